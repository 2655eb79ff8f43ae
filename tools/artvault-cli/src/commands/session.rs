//! Run storefront actions line by line.
//!
//! Each line is `tag key=value key="quoted value"`, for example
//! `add-to-cart id=1` or `filter-changed category=anime sort=priceAsc`.
//! Blank lines and `#` comments are skipped; `quit` ends the session.
//! Acknowledgments complete while input is still being read.

use anyhow::{Context as _, Result};
use artvault_shop::ack::AckKind;
use artvault_shop::dispatch::{Outcome, RawAction, Storefront};
use chrono::Utc;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use super::SessionArgs;
use crate::context::Context;

#[derive(Debug, Default, Serialize)]
struct SessionSummary {
    session_id: String,
    started_at: String,
    elapsed_ms: i64,
    handled: usize,
    ignored: usize,
    malformed: usize,
    acknowledged: Vec<AckKind>,
    cancelled: Vec<AckKind>,
    cart_entries: usize,
    cart_total: String,
}

enum Step {
    Continue,
    Quit,
}

/// Run the session command.
pub async fn run(args: SessionArgs, ctx: &Context) -> Result<()> {
    let reader: Box<dyn AsyncRead + Unpin> = match &args.script {
        Some(path) => {
            let path = ctx.resolve_path(path);
            Box::new(
                tokio::fs::File::open(&path)
                    .await
                    .with_context(|| format!("Failed to open script: {}", path.display()))?,
            )
        }
        None => Box::new(tokio::io::stdin()),
    };
    let mut lines = BufReader::new(reader).lines();

    let started = Utc::now();
    let mut summary = SessionSummary {
        session_id: ctx.logger.session_id().to_string(),
        started_at: started.to_rfc3339(),
        ..Default::default()
    };
    ctx.output.info(&format!(
        "Session {} started {}",
        summary.session_id,
        started.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    let mut shop = ctx.storefront_builder()?.build();
    let mut line_no = 0usize;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read action")? else {
                    break;
                };
                line_no += 1;
                if let Step::Quit = step(&mut shop, &line, line_no, &mut summary, ctx) {
                    break;
                }
            }
            Some(kind) = shop.next_ack() => {
                if shop.complete(kind) {
                    summary.acknowledged.push(kind);
                }
            }
        }
    }

    if args.no_wait {
        summary.cancelled = shop.dispose();
    } else {
        while shop.has_pending() {
            let spinner = ctx.output.spinner("Waiting for acknowledgment...");
            let kind = shop.settle_next().await;
            spinner.finish_and_clear();
            match kind {
                Some(kind) => summary.acknowledged.push(kind),
                None => break,
            }
        }
    }

    summary.elapsed_ms = (Utc::now() - started).num_milliseconds();
    summary.cart_entries = shop.cart().len();
    summary.cart_total = shop.view()?.cart.total.display();

    if ctx.output.is_json() {
        ctx.output.json(&summary);
        return Ok(());
    }

    ctx.output.header("Session summary");
    ctx.output.kv("handled", &summary.handled.to_string());
    ctx.output.kv("ignored", &summary.ignored.to_string());
    if summary.malformed > 0 {
        ctx.output.kv("malformed", &summary.malformed.to_string());
    }
    for kind in &summary.acknowledged {
        ctx.output.list_item(&format!("acknowledged {}", kind.as_str()));
    }
    for kind in &summary.cancelled {
        ctx.output.list_item(&format!("cancelled {}", kind.as_str()));
    }
    ctx.output.kv("cart", &format!("{} entries, {}", summary.cart_entries, summary.cart_total));
    ctx.output.kv("elapsed", &format!("{} ms", summary.elapsed_ms));

    Ok(())
}

fn step(
    shop: &mut Storefront,
    line: &str,
    line_no: usize,
    summary: &mut SessionSummary,
    ctx: &Context,
) -> Step {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Step::Continue;
    }
    if matches!(line, "quit" | "exit") {
        return Step::Quit;
    }

    let raw: RawAction = match line.parse() {
        Ok(raw) => raw,
        Err(e) => {
            summary.malformed += 1;
            ctx.output.warn(&format!("line {}: {}", line_no, e));
            return Step::Continue;
        }
    };

    match shop.dispatch(&raw) {
        Outcome::Handled => summary.handled += 1,
        Outcome::Ignored => {
            summary.ignored += 1;
            ctx.output.debug(&format!("line {}: ignored {}", line_no, raw));
        }
    }
    Step::Continue
}
