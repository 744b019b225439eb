/*!
Macro helpers for the parser.

Most of these macros perform checked versions of unsafe operations in tests
or when the `checked` cfg is enabled just to try catch any UB early.
*/

macro_rules! get_unchecked {
    ($slice:expr, $index:expr) => {{
        #[cfg(any(all(test, debug), checked))]
        {
            ($slice)
                .get($index)
                .expect("attempt to index out of bounds")
        }

        #[cfg(not(any(all(test, debug), checked)))]
        {
            // SAFETY: the index must always be in bounds
            #[allow(unused_unsafe)]
            unsafe {
                ($slice).get_unchecked($index)
            }
        }
    }};
}

macro_rules! get_unchecked_mut {
    ($slice:expr, $index:expr) => {{
        #[cfg(any(all(test, debug), checked))]
        {
            ($slice)
                .get_mut($index)
                .expect("attempt to index out of bounds")
        }

        #[cfg(not(any(all(test, debug), checked)))]
        {
            // SAFETY: the index must always be in bounds
            #[allow(unused_unsafe)]
            unsafe {
                ($slice).get_unchecked_mut($index)
            }
        }
    }};
}

macro_rules! test_assert {
    ($($tokens:tt)*) => {{
        #[cfg(test)]
        {
            debug_assert!($($tokens)*);
        }
    }};
}

macro_rules! test_assert_eq {
    ($($tokens:tt)*) => {{
        #[cfg(test)]
        {
            debug_assert_eq!($($tokens)*);
        }
    }};
}
