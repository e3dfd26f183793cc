//! Selftest command implementation.
//!
//! Plants a synthetic star table in this process's heap and runs the real
//! in-process scan over it.

use std::time::Instant;

use anyhow::{Result, bail};
use galaxy_core::memory::layout::{star, thresholds};
use galaxy_core::{
    CurrentProcess, NativeRuntime, ScanConfig, ScanOutcome, ScanSession, StarRecord, audit,
};
use owo_colors::OwoColorize;

use super::print_audit;

/// Run the selftest command
pub fn run(stars: usize, landmark: &str) -> Result<()> {
    let min_records = ScanConfig::default().min_records;
    if stars <= min_records {
        bail!(
            "--stars must be greater than {} for the table to be accepted",
            min_records
        );
    }

    let expected: Vec<StarRecord> = (0..stars).map(|i| synthetic_star(landmark, i)).collect();
    let table = encode_table(&expected)?;
    println!(
        "Planted {} stars ({} bytes) at 0x{:X}",
        stars,
        table.len(),
        table.as_ptr() as usize
    );

    // Region snapshot must be taken after the table is allocated
    let process = CurrentProcess::open()?;
    let session = ScanSession::new(&process, &NativeRuntime, ScanConfig::default());

    let started = Instant::now();
    let outcome = session.run_landmark(landmark)?;
    let elapsed = started.elapsed();
    std::hint::black_box(&table);

    let stats = *outcome.stats();
    let ScanOutcome::Found { result, .. } = outcome else {
        println!(
            "{}: table not found after {} regions ({:.2}s)",
            "FAIL".red(),
            stats.regions_scanned,
            elapsed.as_secs_f64()
        );
        bail!("selftest failed");
    };

    println!(
        "Found table at 0x{:X} in region 0x{:X}-0x{:X} ({:.2}s, {} regions scanned)",
        result.anchor,
        result.region.base,
        result.region.end(),
        elapsed.as_secs_f64(),
        stats.regions_scanned
    );

    if result.stars != expected {
        println!(
            "{}: decoded {} stars, expected {}",
            "FAIL".red(),
            result.stars.len(),
            expected.len()
        );
        bail!("selftest failed");
    }

    println!("{}: all {} stars decoded", "PASS".green(), stars);
    print_audit(&audit(&result.stars));
    Ok(())
}

fn synthetic_star(landmark: &str, index: usize) -> StarRecord {
    let name = if index == 0 {
        landmark.to_string()
    } else {
        format!("Selftest-{:05}", index)
    };
    let i = index as i32;
    StarRecord {
        x: i * 3 - 1000,
        y: 500 - i,
        z: (i % 200) - 100,
        name,
    }
}

/// Lay the stars out as the host does, followed by enough empty strides to
/// end the walk.
fn encode_table(stars: &[StarRecord]) -> Result<Vec<u8>> {
    let entry_size = star::ENTRY_SIZE as usize;
    let name_at = star::NAME as usize;
    // Names must fit inside their own stride here
    let max_name = (star::MAX_NAME_LENGTH as usize).min(entry_size - name_at);
    let trailer = thresholds::MAX_CONSECUTIVE_FAILURES + 1;
    let mut table = vec![0u8; (stars.len() + trailer) * entry_size];

    for (entry, record) in table.chunks_exact_mut(entry_size).zip(stars) {
        let name = record.name.as_bytes();
        if !(star::MIN_NAME_LENGTH as usize..=max_name).contains(&name.len()) {
            bail!(
                "star name {:?} must be {}-{} bytes",
                record.name,
                star::MIN_NAME_LENGTH,
                max_name
            );
        }
        put(entry, star::X, &(record.x as f32).to_le_bytes());
        put(entry, star::Y, &(record.y as f32).to_le_bytes());
        put(entry, star::Z, &(record.z as f32).to_le_bytes());
        put(entry, star::NAME_LENGTH, &(name.len() as u16).to_le_bytes());
        put(entry, star::NAME, name);
    }
    Ok(table)
}

fn put(entry: &mut [u8], offset: u64, bytes: &[u8]) {
    let start = offset as usize;
    entry[start..start + bytes.len()].copy_from_slice(bytes);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_table_layout() {
        let stars = vec![synthetic_star("Sol", 0), synthetic_star("Sol", 7)];
        let table = encode_table(&stars).unwrap();
        let entry_size = star::ENTRY_SIZE as usize;

        assert_eq!(
            table.len(),
            (2 + thresholds::MAX_CONSECUTIVE_FAILURES + 1) * entry_size
        );
        assert_eq!(&table[12..14], &[3, 0]);
        assert_eq!(&table[14..17], b"Sol");

        let second = &table[entry_size..2 * entry_size];
        let x = f32::from_le_bytes(second[0..4].try_into().unwrap());
        assert_eq!(x as i32, stars[1].x);
        assert_eq!(&second[14..28], b"Selftest-00007");
    }

    #[test]
    fn test_encode_table_rejects_bad_name_lengths() {
        assert!(encode_table(&[synthetic_star("S", 0)]).is_err());
        assert!(encode_table(&[synthetic_star(&"N".repeat(35), 0)]).is_err());
        assert!(encode_table(&[synthetic_star(&"N".repeat(34), 0)]).is_ok());
    }
}
