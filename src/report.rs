//! The I/O shell: evidence file reader and discount output writer.
//!
//! Both functions use only the public types of the crate; file handles are
//! scoped to the function and the writer is flushed before returning on the
//! success path.

use crate::{
    equation::{EvaluationContext, ReferralContext},
    error::EbslError,
    opinion::Evidence,
    referral::{DirectReferralEvidence, Link},
};
use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

/// Reads a line-delimited evidence file.
///
/// Lines with exactly four whitespace-separated fields are parsed as
/// `<from> <to> <positive> <negative>`; any other field count is skipped,
/// which permits blank lines and comments. Parse failures on well-formed
/// lines abort with the underlying error, as do negative node ids.
pub fn read_evidence<P: AsRef<Path>>(path: P) -> Result<DirectReferralEvidence, EbslError> {
    tracing::debug!("reading evidence from {:?}", path.as_ref());
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut evidence = DirectReferralEvidence::default();

    for line in reader.lines() {
        let line = line?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 4 {
            continue;
        }

        let from: i64 = fields[0].parse()?;
        if from < 0 {
            return Err(EbslError::Parse(
                "link source must be non-negative number".to_string(),
            ));
        }
        let to: i64 = fields[1].parse()?;
        if to < 0 {
            return Err(EbslError::Parse(
                "link destination must be non-negative number".to_string(),
            ));
        }
        let positive: f64 = fields[2].parse()?;
        let negative: f64 = fields[3].parse()?;

        evidence.insert(
            Link::new(from as u64, to as u64),
            Evidence::new(positive, negative),
        );
    }

    Ok(evidence)
}

/// Writes one `<from>\t<to>\t<discount>` line per final referral opinion,
/// in the matrix's ascending link order.
pub fn write_discounts<P: AsRef<Path>>(
    path: P,
    context: &ReferralContext,
) -> Result<(), EbslError> {
    tracing::debug!(
        count = context.final_opinions().len(),
        "writing final referral trust discounts to {:?}",
        path.as_ref()
    );
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    for (link, opinion) in context.final_opinions().iter() {
        writeln!(
            writer,
            "{}\t{}\t{}",
            link.from,
            link.to,
            context.discount(opinion)
        )?;
    }

    writer.flush()?;
    Ok(())
}
