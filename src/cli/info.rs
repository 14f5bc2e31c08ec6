use anyhow::Result;
use std::path::PathBuf;

use convstudy::reader;

/// Display information about one diagnostic file
pub fn run(file: PathBuf) -> Result<()> {
    let series = reader::read(&file)?;

    println!("Diagnostic File Information");
    println!("===========================");
    println!("File: {}", file.display());
    println!();
    println!("Records: {}", series.len());

    if let (Some(first), Some(last)) = (series.records().first(), series.records().last()) {
        println!(
            "Time span: {:.6e} s - {:.6e} s",
            first.time_s, last.time_s
        );

        let (mut r_min, mut r_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for record in series.records() {
            if record.radius_m.is_finite() {
                r_min = r_min.min(record.radius_m);
                r_max = r_max.max(record.radius_m);
            }
        }
        if r_min.is_finite() {
            println!("Radius range: {r_min:.6e} m - {r_max:.6e} m");
        } else {
            println!("Radius range: no finite values");
        }
    }

    Ok(())
}
