/// Get the `bit_index` bit value from `num`.
///
/// # Example
/// ```
/// use qmath::utils::get_bit;
/// let n = get_bit(2, 1);
/// assert_eq!(n, true);
/// ```
pub fn get_bit(num: usize, bit_index: usize) -> bool {
    ((num >> bit_index) & 1) != 0
}

/// Extracts bits from a number in a particular order. The bit at `indices[i]` of `num` becomes
/// bit `i` of the output.
///
/// # Example
///
/// ```
/// use qmath::utils::extract_bits;
///
/// let n = extract_bits(0b1010, &[3, 0]);
/// assert_eq!(n, 0b01);
/// ```
pub fn extract_bits(num: usize, indices: &[usize]) -> usize {
    indices.iter().enumerate().fold(0, |acc, (i, index)| {
        let bit = (num >> index) & 1;
        acc | (bit << i)
    })
}

/// Whether basis state `index` of an `n` qubit register has qubit `qubits[i]` equal to bit `i`
/// of `measured`. Qubit 0 is the most significant bit of `index`.
///
/// # Example
///
/// ```
/// use qmath::utils::matches_bits;
///
/// // |10> has qubit 0 set and qubit 1 unset.
/// assert!(matches_bits(2, 0b10, &[0, 1], 0b01));
/// assert!(!matches_bits(2, 0b10, &[1], 0b1));
/// ```
pub fn matches_bits(n: usize, index: usize, qubits: &[usize], measured: usize) -> bool {
    qubits
        .iter()
        .enumerate()
        .all(|(i, q)| get_bit(index, n - 1 - q) == get_bit(measured, i))
}
