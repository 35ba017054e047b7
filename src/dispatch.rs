//! Type-agnostic arithmetic.
//!
//! [`Value`] is the tagged union of every operand kind the toolkit knows about. [`add`] and
//! [`multiply`] look up a rule by the runtime kinds of both operands and the requested
//! [`Operation`]; a pair without a rule fails with [`MathError::BadOperation`].
//!
//! ```
//! use qmath::dispatch::{add, multiply, Value};
//! use qmath::vector::Vector;
//!
//! let v = Value::Vector(Vector::new(vec![1.0, 2.0, 3.0]));
//! let scaled = multiply(&v, &Value::Scalar(2.5)).unwrap();
//! assert_eq!(scaled, Value::Vector(Vector::new(vec![2.5, 5.0, 7.5])));
//!
//! // Scalars cannot be added to vectors.
//! assert!(add(&v, &Value::Scalar(2.5)).is_err());
//! ```
//!
//! [`Dispatcher`] is the open version of the same table: callers may register rules for pairs
//! the standard table leaves out (or override standard ones).

use crate::errors::{MathError, MathResult};
use crate::matrix::Matrix;
use crate::types::{Precision, Ring};
use crate::vector::Vector;
use std::collections::HashMap;
use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;

/// The operations the dispatcher resolves.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Operation {
    /// `a + b`
    Add,
    /// `a * b`
    Multiply,
}

impl Operation {
    /// Symbolic name of the operation.
    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Multiply => "*",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The runtime kind of a [`Value`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Kind {
    /// A single number.
    Scalar,
    /// A [`Vector`].
    Vector,
    /// A [`Matrix`] of numbers.
    Matrix,
    /// A [`Field`].
    Function,
    /// An [`Operator`].
    Operator,
}

type FieldFunction<P> = dyn Fn(&Vector<P>) -> MathResult<Value<P>>;
type OperatorFunction<P> = dyn Fn(&Field<P>) -> MathResult<Field<P>>;

/// A function of a point, producing any kind of value (scalar and vector fields).
#[derive(Clone)]
pub struct Field<P: Precision = f64> {
    func: Rc<FieldFunction<P>>,
}

impl<P: Precision> Field<P> {
    /// Wrap a function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Vector<P>) -> MathResult<Value<P>> + 'static,
    {
        Self { func: Rc::new(f) }
    }

    /// Evaluate at `x`.
    pub fn eval(&self, x: &Vector<P>) -> MathResult<Value<P>> {
        (*self.func)(x)
    }
}

impl<P: Precision> Debug for Field<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field").finish()
    }
}

/// A named map from fields to fields, the shape of a differential operator.
#[derive(Clone)]
pub struct Operator<P: Precision = f64> {
    name: String,
    func: Rc<OperatorFunction<P>>,
}

impl<P: Precision> Operator<P> {
    /// Wrap a function.
    pub fn new<S, F>(name: S, f: F) -> Self
    where
        S: Into<String>,
        F: Fn(&Field<P>) -> MathResult<Field<P>> + 'static,
    {
        Self {
            name: name.into(),
            func: Rc::new(f),
        }
    }

    /// Name used when displaying the operator.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply the operator to a field.
    pub fn apply(&self, field: &Field<P>) -> MathResult<Field<P>> {
        (*self.func)(field)
    }
}

impl<P: Precision> Debug for Operator<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Operator").field("name", &self.name).finish()
    }
}

/// Any operand the dispatcher understands.
#[derive(Debug, Clone)]
pub enum Value<P: Precision = f64> {
    /// A single number.
    Scalar(P),
    /// A vector.
    Vector(Vector<P>),
    /// A matrix of numbers.
    Matrix(Matrix<P>),
    /// A scalar or vector field.
    Function(Field<P>),
    /// An operator on fields.
    Operator(Operator<P>),
}

impl<P: Precision> Value<P> {
    /// The runtime kind of this value.
    pub fn kind(&self) -> Kind {
        match self {
            Value::Scalar(_) => Kind::Scalar,
            Value::Vector(_) => Kind::Vector,
            Value::Matrix(_) => Kind::Matrix,
            Value::Function(_) => Kind::Function,
            Value::Operator(_) => Kind::Operator,
        }
    }
}

/// Functions and operators have no identity, so they never compare equal.
impl<P: Precision> PartialEq for Value<P> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Scalar(a), Value::Scalar(b)) => a == b,
            (Value::Vector(a), Value::Vector(b)) => a == b,
            (Value::Matrix(a), Value::Matrix(b)) => a == b,
            (_, _) => false,
        }
    }
}

impl<P: Precision> Display for Value<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Scalar(x) => write!(f, "{}", x),
            Value::Vector(v) => write!(f, "{}", v),
            Value::Matrix(m) => write!(f, "{}", m),
            Value::Function(_) => write!(f, "<function>"),
            Value::Operator(op) => write!(f, "{}", op.name),
        }
    }
}

impl<P: Precision> From<Vector<P>> for Value<P> {
    fn from(v: Vector<P>) -> Self {
        Value::Vector(v)
    }
}

impl<P: Precision> From<Matrix<P>> for Value<P> {
    fn from(m: Matrix<P>) -> Self {
        Value::Matrix(m)
    }
}

impl<P: Precision> From<Field<P>> for Value<P> {
    fn from(f: Field<P>) -> Self {
        Value::Function(f)
    }
}

impl<P: Precision> From<Operator<P>> for Value<P> {
    fn from(op: Operator<P>) -> Self {
        Value::Operator(op)
    }
}

/// A dispatch rule. Called only with operands of the kinds it was registered for.
pub type Rule<P> = fn(&Value<P>, &Value<P>) -> MathResult<Value<P>>;

fn bad_operation<P: Precision>(a: &Value<P>, b: &Value<P>, operation: Operation) -> MathError {
    MathError::BadOperation {
        lhs: a.to_string(),
        rhs: b.to_string(),
        operation,
    }
}

/// The built in rule for a pair of kinds, if any.
pub fn standard_rule<P: Precision>(lhs: Kind, rhs: Kind, operation: Operation) -> Option<Rule<P>> {
    use Kind as K;
    use Operation as Op;

    let rule: Rule<P> = match (operation, lhs, rhs) {
        (Op::Add, K::Scalar, K::Scalar) => add_scalars,
        (Op::Multiply, K::Scalar, K::Scalar) => multiply_scalars,
        (Op::Add, K::Vector, K::Vector) => add_vectors,
        (Op::Multiply, K::Vector, K::Vector) => dot_vectors,
        (Op::Multiply, K::Scalar, K::Vector) | (Op::Multiply, K::Vector, K::Scalar) => scale_vector,
        (Op::Add, K::Matrix, K::Matrix) => add_matrices,
        (Op::Multiply, K::Matrix, K::Matrix) => multiply_matrices,
        (Op::Multiply, K::Scalar, K::Matrix) | (Op::Multiply, K::Matrix, K::Scalar) => scale_matrix,
        (Op::Multiply, K::Matrix, K::Vector) => multiply_matrix_vector,
        (Op::Add, K::Function, K::Function) | (Op::Add, K::Operator, K::Operator) => add_composed,
        (Op::Multiply, K::Function, K::Function)
        | (Op::Multiply, K::Scalar, K::Function)
        | (Op::Multiply, K::Function, K::Scalar)
        | (Op::Multiply, K::Scalar, K::Operator)
        | (Op::Multiply, K::Operator, K::Scalar) => multiply_composed,
        (Op::Multiply, K::Operator, K::Function) => apply_operator,
        _ => return None,
    };
    Some(rule)
}

type RuleTable<P> = HashMap<(Kind, Kind, Operation), Rule<P>>;

/// Registered rules, shared with every function and operator composed under them.
type SharedRules<P> = Rc<RuleTable<P>>;

fn dispatch<P: Precision>(
    operation: Operation,
    a: &Value<P>,
    b: &Value<P>,
    rules: &SharedRules<P>,
) -> MathResult<Value<P>> {
    if let Some(rule) = rules.get(&(a.kind(), b.kind(), operation)) {
        return rule(a, b);
    }
    if let Some(composed) = compose(operation, a, b, rules) {
        return composed;
    }
    match standard_rule(a.kind(), b.kind(), operation) {
        Some(rule) => rule(a, b),
        None => Err(bad_operation(a, b, operation)),
    }
}

/// `a + b` for any pair of kinds with a standard rule.
pub fn add<P: Precision>(a: &Value<P>, b: &Value<P>) -> MathResult<Value<P>> {
    dispatch(Operation::Add, a, b, &SharedRules::default())
}

/// `a * b` for any pair of kinds with a standard rule.
pub fn multiply<P: Precision>(a: &Value<P>, b: &Value<P>) -> MathResult<Value<P>> {
    dispatch(Operation::Multiply, a, b, &SharedRules::default())
}

/// An extensible rule table. Registered rules take priority over the standard ones.
///
/// Functions and operators composed by a dispatcher keep resolving through its rules when they
/// are evaluated. They see the rules registered at the time they were composed.
#[derive(Clone)]
pub struct Dispatcher<P: Precision = f64> {
    rules: SharedRules<P>,
}

impl<P: Precision> Default for Dispatcher<P> {
    fn default() -> Self {
        Self {
            rules: SharedRules::default(),
        }
    }
}

impl<P: Precision> Debug for Dispatcher<P> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("rules", &self.rules.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl<P: Precision> Dispatcher<P> {
    /// A dispatcher with only the standard rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `rule` for `lhs <operation> rhs`, returning any rule it replaced.
    pub fn register(
        &mut self,
        lhs: Kind,
        rhs: Kind,
        operation: Operation,
        rule: Rule<P>,
    ) -> Option<Rule<P>> {
        Rc::make_mut(&mut self.rules).insert((lhs, rhs, operation), rule)
    }

    /// The rule which would run for this pair of kinds.
    pub fn rule(&self, lhs: Kind, rhs: Kind, operation: Operation) -> Option<Rule<P>> {
        self.rules
            .get(&(lhs, rhs, operation))
            .cloned()
            .or_else(|| standard_rule(lhs, rhs, operation))
    }

    /// Run `operation` on `a` and `b`.
    pub fn apply(&self, operation: Operation, a: &Value<P>, b: &Value<P>) -> MathResult<Value<P>> {
        dispatch(operation, a, b, &self.rules)
    }

    /// `a + b`
    pub fn add(&self, a: &Value<P>, b: &Value<P>) -> MathResult<Value<P>> {
        self.apply(Operation::Add, a, b)
    }

    /// `a * b`
    pub fn multiply(&self, a: &Value<P>, b: &Value<P>) -> MathResult<Value<P>> {
        self.apply(Operation::Multiply, a, b)
    }
}

/// Values are the entries of symbolic matrices, so the determinant can mix vectors and numbers.
impl<P: Precision> Ring for Value<P> {
    fn try_add(&self, rhs: &Self) -> MathResult<Self> {
        add(self, rhs)
    }

    fn try_sub(&self, rhs: &Self) -> MathResult<Self> {
        add(self, &multiply(&Value::Scalar(-P::one()), rhs)?)
    }

    fn try_mul(&self, rhs: &Self) -> MathResult<Self> {
        multiply(self, rhs)
    }
}

fn add_scalars<P: Precision>(a: &Value<P>, b: &Value<P>) -> MathResult<Value<P>> {
    match (a, b) {
        (Value::Scalar(x), Value::Scalar(y)) => Ok(Value::Scalar(*x + *y)),
        _ => Err(bad_operation(a, b, Operation::Add)),
    }
}

fn multiply_scalars<P: Precision>(a: &Value<P>, b: &Value<P>) -> MathResult<Value<P>> {
    match (a, b) {
        (Value::Scalar(x), Value::Scalar(y)) => Ok(Value::Scalar(*x * *y)),
        _ => Err(bad_operation(a, b, Operation::Multiply)),
    }
}

fn add_vectors<P: Precision>(a: &Value<P>, b: &Value<P>) -> MathResult<Value<P>> {
    match (a, b) {
        (Value::Vector(x), Value::Vector(y)) => x.checked_add(y).map(Value::Vector),
        _ => Err(bad_operation(a, b, Operation::Add)),
    }
}

fn dot_vectors<P: Precision>(a: &Value<P>, b: &Value<P>) -> MathResult<Value<P>> {
    match (a, b) {
        (Value::Vector(x), Value::Vector(y)) => x.dot(y).map(Value::Scalar),
        _ => Err(bad_operation(a, b, Operation::Multiply)),
    }
}

fn scale_vector<P: Precision>(a: &Value<P>, b: &Value<P>) -> MathResult<Value<P>> {
    match (a, b) {
        (Value::Scalar(k), Value::Vector(v)) | (Value::Vector(v), Value::Scalar(k)) => {
            Ok(Value::Vector(v.scale(*k)))
        }
        _ => Err(bad_operation(a, b, Operation::Multiply)),
    }
}

fn add_matrices<P: Precision>(a: &Value<P>, b: &Value<P>) -> MathResult<Value<P>> {
    match (a, b) {
        (Value::Matrix(x), Value::Matrix(y)) => x.checked_add(y).map(Value::Matrix),
        _ => Err(bad_operation(a, b, Operation::Add)),
    }
}

fn multiply_matrices<P: Precision>(a: &Value<P>, b: &Value<P>) -> MathResult<Value<P>> {
    match (a, b) {
        (Value::Matrix(x), Value::Matrix(y)) => x.matmul(y).map(Value::Matrix),
        _ => Err(bad_operation(a, b, Operation::Multiply)),
    }
}

fn scale_matrix<P: Precision>(a: &Value<P>, b: &Value<P>) -> MathResult<Value<P>> {
    match (a, b) {
        (Value::Scalar(k), Value::Matrix(m)) | (Value::Matrix(m), Value::Scalar(k)) => {
            Ok(Value::Matrix(m.map(|x| *k * *x)))
        }
        _ => Err(bad_operation(a, b, Operation::Multiply)),
    }
}

fn multiply_matrix_vector<P: Precision>(a: &Value<P>, b: &Value<P>) -> MathResult<Value<P>> {
    match (a, b) {
        (Value::Matrix(m), Value::Vector(v)) => m
            .mul_column(&v.column())
            .map(|c| Value::Vector(c.into())),
        _ => Err(bad_operation(a, b, Operation::Multiply)),
    }
}

/// Standard rules which build new functions or operators. Those capture `rules` so that
/// evaluating them later dispatches the same way.
fn compose<P: Precision>(
    operation: Operation,
    a: &Value<P>,
    b: &Value<P>,
    rules: &SharedRules<P>,
) -> Option<MathResult<Value<P>>> {
    use Operation as Op;

    let composed = match (operation, a, b) {
        (_, Value::Function(f), Value::Function(g)) => {
            Value::Function(pointwise(f, g, operation, rules))
        }
        (Op::Multiply, Value::Scalar(k), Value::Function(f))
        | (Op::Multiply, Value::Function(f), Value::Scalar(k)) => {
            Value::Function(scaled_field(*k, f, rules))
        }
        (Op::Add, Value::Operator(x), Value::Operator(y)) => {
            Value::Operator(operator_sum(x, y, rules))
        }
        (Op::Multiply, Value::Scalar(k), Value::Operator(op))
        | (Op::Multiply, Value::Operator(op), Value::Scalar(k)) => {
            Value::Operator(scaled_operator(*k, op, rules))
        }
        _ => return None,
    };
    Some(Ok(composed))
}

fn pointwise<P: Precision>(
    f: &Field<P>,
    g: &Field<P>,
    operation: Operation,
    rules: &SharedRules<P>,
) -> Field<P> {
    let (f, g, rules) = (f.clone(), g.clone(), rules.clone());
    Field::new(move |x| {
        let (fx, gx) = (f.eval(x)?, g.eval(x)?);
        dispatch(operation, &fx, &gx, &rules)
    })
}

fn scaled_field<P: Precision>(k: P, f: &Field<P>, rules: &SharedRules<P>) -> Field<P> {
    let (f, rules) = (f.clone(), rules.clone());
    Field::new(move |x| {
        dispatch(Operation::Multiply, &Value::Scalar(k), &f.eval(x)?, &rules)
    })
}

fn operator_sum<P: Precision>(
    x: &Operator<P>,
    y: &Operator<P>,
    rules: &SharedRules<P>,
) -> Operator<P> {
    let name = format!("({} + {})", x.name, y.name);
    let (x, y, rules) = (x.clone(), y.clone(), rules.clone());
    Operator::new(name, move |f| {
        Ok(pointwise(&x.apply(f)?, &y.apply(f)?, Operation::Add, &rules))
    })
}

fn scaled_operator<P: Precision>(k: P, op: &Operator<P>, rules: &SharedRules<P>) -> Operator<P> {
    let name = format!("{} {}", k, op.name);
    let (op, rules) = (op.clone(), rules.clone());
    Operator::new(name, move |f| Ok(scaled_field(k, &op.apply(f)?, &rules)))
}

fn add_composed<P: Precision>(a: &Value<P>, b: &Value<P>) -> MathResult<Value<P>> {
    compose(Operation::Add, a, b, &SharedRules::default())
        .unwrap_or_else(|| Err(bad_operation(a, b, Operation::Add)))
}

fn multiply_composed<P: Precision>(a: &Value<P>, b: &Value<P>) -> MathResult<Value<P>> {
    compose(Operation::Multiply, a, b, &SharedRules::default())
        .unwrap_or_else(|| Err(bad_operation(a, b, Operation::Multiply)))
}

fn apply_operator<P: Precision>(a: &Value<P>, b: &Value<P>) -> MathResult<Value<P>> {
    match (a, b) {
        (Value::Operator(op), Value::Function(f)) => op.apply(f).map(Value::Function),
        _ => Err(bad_operation(a, b, Operation::Multiply)),
    }
}
