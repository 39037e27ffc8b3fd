//! One-shot snapshot for non-interactive use.
//!
//! When stdout is not a terminal the binary requests all four metals once
//! and prints each quote as a JSON line in completion order.

use std::io::Write;

use futures_util::stream::{FuturesUnordered, StreamExt};
use tracing::info;

use crate::models::Metal;
use crate::oracle::PriceSource;

/// Requests every metal concurrently and writes each quote to `out` as soon
/// as it resolves. Returns the number of failed quotes.
///
/// # Errors
///
/// Returns an error only if serialization or writing fails.
pub async fn print_snapshot<S, W>(source: &S, out: &mut W) -> crate::Result<usize>
where
    S: PriceSource,
    W: Write,
{
    let mut pending: FuturesUnordered<_> = Metal::ALL
        .into_iter()
        .map(|metal| source.request_price(metal.as_str()))
        .collect();

    let mut failures = 0;
    while let Some(quote) = pending.next().await {
        if !quote.is_success() {
            failures += 1;
        }
        writeln!(out, "{}", quote.to_json_line()?)?;
        out.flush()?;
    }

    info!(failures, "Snapshot complete");
    Ok(failures)
}
