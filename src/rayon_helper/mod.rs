/// Choose between iter and par_iter
#[cfg(not(feature = "parallel"))]
macro_rules! iter {
    ($e:expr) => {
        $e.iter()
    };
}

/// Choose between iter and par_iter
#[cfg(feature = "parallel")]
macro_rules! iter {
    ($e:expr) => {
        $e.par_iter()
    };
}

/// Choose between into_iter and into_par_iter
#[cfg(not(feature = "parallel"))]
macro_rules! into_iter {
    ($e:expr) => {
        $e.into_iter()
    };
}

/// Choose between into_iter and into_par_iter
#[cfg(feature = "parallel")]
macro_rules! into_iter {
    ($e:expr) => {
        $e.into_par_iter()
    };
}
