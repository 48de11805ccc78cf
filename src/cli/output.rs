//! Console rendering of pass results
//!
//! Functions here build strings; the command handlers decide where they go.

use std::fmt::Write;

use crate::app::{CoverageResult, PassResult, Subscriber};

const RULE: &str = "______________________________________________________________";

/// Block describing one qualifying subscriber
pub fn render_subscriber(subscriber: &Subscriber) -> String {
    let ids: Vec<String> = subscriber
        .magazine_ids
        .iter()
        .map(|id| id.to_string())
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "{}", RULE);
    let _ = writeln!(out, "Subscriber Info");
    let _ = writeln!(out, "ID : {}", subscriber.id);
    let _ = writeln!(out, "FirstName : {}", subscriber.first_name);
    let _ = writeln!(out, "LastName : {}", subscriber.last_name);
    let _ = writeln!(out, "Magazine Ids : {}", ids.join(", "));
    let _ = writeln!(out, "{}", RULE);
    out
}

/// One-line verdict of the answer endpoint
pub fn render_verdict(result: &CoverageResult) -> String {
    if result.answer_correct {
        format!("TIME TAKEN : {}", result.total_time)
    } else {
        match &result.should_be {
            Some(expected) if !expected.is_empty() => {
                format!("Wrong output. Expected: {}", expected.join(", "))
            }
            _ => "Wrong output.".to_string(),
        }
    }
}

/// Full report of a pass: subscribers, summary line and verdict
pub fn render_pass(pass: &PassResult) -> String {
    let mut out = String::new();
    for subscriber in &pass.matching {
        out.push_str(&render_subscriber(subscriber));
        out.push('\n');
    }

    let stats = &pass.stats;
    let _ = writeln!(
        out,
        "{} of {} subscribers cover all {} categories ({} magazines, {:.2?})",
        stats.qualifying, stats.subscribers, stats.categories, stats.magazines, stats.duration
    );
    let _ = writeln!(out, "{}", render_verdict(&pass.result));
    out
}
