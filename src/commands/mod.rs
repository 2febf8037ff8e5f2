//! One module per subcommand of the `rl_plots` binary. Each splits the data
//! gathering (tested) from rendering and printing.

pub mod compare;
pub mod errorbars;
pub mod eval;
pub mod experiments;
pub mod inspect;
