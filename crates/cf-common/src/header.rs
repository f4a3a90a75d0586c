//! ncdump-style text summary of a dataset.

use std::fmt::Write;

use crate::attrs::Attributes;
use crate::dataset::Dataset;

impl Dataset {
    /// Render the dataset's structure the way `ncdump -h` prints a file
    /// header: dimensions, variables with their attributes, then global
    /// attributes. Values are not printed.
    pub fn header(&self, name: &str) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_header(&mut out, name);
        out
    }

    fn write_header(&self, out: &mut String, name: &str) -> std::fmt::Result {
        writeln!(out, "netcdf {} {{", name)?;

        writeln!(out, "dimensions:")?;
        for (dim, size) in &self.dims {
            writeln!(out, "\t{} = {} ;", dim, size)?;
        }

        writeln!(out, "variables:")?;
        for (var_name, var) in self.variables() {
            if var.dims.is_empty() {
                writeln!(out, "\t{} {} ;", var.data.dtype(), var_name)?;
            } else {
                writeln!(out, "\t{} {}({}) ;", var.data.dtype(), var_name, var.dims.join(", "))?;
            }
            write_attrs(out, var_name, &var.attrs)?;
        }

        if !self.attrs.is_empty() {
            writeln!(out)?;
            writeln!(out, "// global attributes:")?;
            write_attrs(out, "", &self.attrs)?;
        }
        writeln!(out, "}}")
    }
}

fn write_attrs(out: &mut String, prefix: &str, attrs: &Attributes) -> std::fmt::Result {
    for (key, value) in attrs {
        writeln!(out, "\t\t{}:{} = {} ;", prefix, key, value)?;
    }
    Ok(())
}
