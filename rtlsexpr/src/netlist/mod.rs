//! Netlist serialization to the s-expression format.

use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{with_err_context, ErrorContext, Result};
use crate::rtl::{Design, Selection};

pub mod sexpr;

pub use self::sexpr::SexprWriter;

/// The version integer stamped at the head of emitted documents.
pub const FORMAT_VERSION: i64 = 1;

/// Options describing the output of the s-expression netlister.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct NetlistOpts {
    /// Restrict output to the selected objects. `None` emits everything.
    pub selection: Option<Selection>,
}

/// Writes an s-expression netlist of `design` to `out`.
pub fn write_netlist(design: &Design, out: &mut dyn Write, opts: &NetlistOpts) -> Result<()> {
    with_err_context(write_netlist_inner(design, out, opts), || {
        ErrorContext::Task(arcstr::literal!("writing s-expression netlist"))
    })
}

fn write_netlist_inner(design: &Design, out: &mut dyn Write, opts: &NetlistOpts) -> Result<()> {
    let mut writer = SexprWriter::new(design, opts.selection.as_ref());
    let text = writer.render_design()?;
    out.write_all(text.as_bytes())?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

/// Writes an s-expression netlist of `design` to the file at `path`, or to
/// standard output when `path` is `None`.
///
/// A destination that cannot be opened for writing is fatal; the error
/// carries the path and the underlying system reason.
pub fn write_netlist_file(design: &Design, path: Option<&Path>, opts: &NetlistOpts) -> Result<()> {
    match path {
        Some(path) => {
            let mut file = crate::io::create_file(path)?;
            write_netlist(design, &mut file, opts)
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            write_netlist(design, &mut lock, opts)
        }
    }
}
