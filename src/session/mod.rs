//! Interactive session loops
//!
//! One blocking read-dispatch-print loop per program. Backend failures
//! raised by a menu action are printed and the loop carries on; quitting
//! and I/O errors end the session.

pub mod catalog;
pub mod zucc;

use crate::error::{OrderdeskError, Result};
use crate::prompt::Prompter;
use std::io::{BufRead, Write};

/// Print a database failure from a menu action and keep going
fn report<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    outcome: Result<()>,
) -> Result<()> {
    match outcome {
        Err(OrderdeskError::Database(e)) => prompter.say(e),
        other => other,
    }
}
