#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(val) => val,
            Err(err) => panic!("Expected Ok(_), got Err({:?})", err),
        }
    };
    ($expr:expr, $($arg:tt)+) => {
        match $expr {
            Ok(val) => val,
            Err(err) => panic!(concat!("Expected Ok(_): ", $($arg)+, ": {:?}"), err),
        }
    };
}

/// Asserts that `$expr` failed with an error matching `$pat`.
#[macro_export]
macro_rules! assert_err {
    ($expr:expr, $pat:pat) => {
        match $expr {
            Err($pat) => {}
            Err(err) => panic!(concat!("Expected Err(", stringify!($pat), "), got Err({:?})"), err),
            Ok(_) => panic!(concat!("Expected Err(", stringify!($pat), "), got Ok(_)")),
        }
    };
}
