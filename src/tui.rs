//! Macros for advisory terminal output.
//!
//! Everything printed through these macros is advisory only: greppable
//! mode suppresses it entirely, and accessible mode strips the colored
//! sigils so screen readers are not fed punctuation noise. Aggregation
//! never depends on anything printed here.

/// Prints a detail line, prefixed with a cyan `[~]`.
#[macro_export]
macro_rules! detail {
    ($msg:expr) => {
        println!("{} {}", colored::Colorize::cyan("[~]"), $msg);
    };
    ($msg:expr, $greppable:expr, $accessible:expr) => {
        if !$greppable {
            if $accessible {
                println!("{}", $msg);
            } else {
                $crate::detail!($msg);
            }
        }
    };
}

/// Prints a result line, prefixed with a bold green `[>]`.
#[macro_export]
macro_rules! output {
    ($msg:expr) => {
        println!("{} {}", colored::Colorize::bold(colored::Colorize::green("[>]")), $msg);
    };
    ($msg:expr, $greppable:expr, $accessible:expr) => {
        if !$greppable {
            if $accessible {
                println!("{}", $msg);
            } else {
                $crate::output!($msg);
            }
        }
    };
}

/// Prints a warning line, prefixed with a bold red `[!]`.
#[macro_export]
macro_rules! warning {
    ($msg:expr) => {
        println!("{} {}", colored::Colorize::bold(colored::Colorize::red("[!]")), $msg);
    };
    ($msg:expr, $greppable:expr, $accessible:expr) => {
        if !$greppable {
            if $accessible {
                println!("{}", $msg);
            } else {
                $crate::warning!($msg);
            }
        }
    };
}
