//! Opt-in record of engine decisions.
//!
//! A [`FilterTrace`] is handed to [`TreeFilter::with_trace`] by callers that
//! want to see why the output looks the way it does. Without one, the engine
//! only emits `tracing` events.
//!
//! [`TreeFilter::with_trace`]: crate::filter::TreeFilter::with_trace

use std::fmt;
use std::io::{self, Write};

use serde::Serialize;
use termcolor::{Color, ColorSpec, WriteColor};

/// What the engine did with one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// A leaf matched an inclusion rule and no exclusion rule.
    KeptLeaf,
    /// A leaf was not selected.
    DroppedLeaf,
    /// A node was rebuilt in the output around its surviving children.
    Materialized,
    /// A node carried no selection signal and had at most one surviving child.
    Collapsed,
    /// A node matched an exclusion rule; its children were spliced upward.
    Excluded,
    /// A node matched an exclusion rule with subtree deletion.
    DeletedSubtree,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::KeptLeaf => "keep",
            Decision::DroppedLeaf => "drop",
            Decision::Materialized => "materialize",
            Decision::Collapsed => "collapse",
            Decision::Excluded => "exclude",
            Decision::DeletedSubtree => "delete-subtree",
        }
    }

    fn color(&self) -> Color {
        match self {
            Decision::KeptLeaf | Decision::Materialized => Color::Green,
            Decision::Collapsed => Color::Cyan,
            Decision::Excluded => Color::Yellow,
            Decision::DroppedLeaf | Decision::DeletedSubtree => Color::Red,
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One decided symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceEvent {
    /// Number of ancestors of the symbol.
    pub depth: usize,
    /// Printable kind name of the symbol.
    pub name: String,
    /// Leaf text, when the symbol is a leaf.
    pub text: Option<String>,
    pub decision: Decision,
    /// Fragments the symbol passed to its parent.
    pub fragments: usize,
}

/// Decisions in the order they were made (post-order).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterTrace {
    events: Vec<TraceEvent>,
}

impl FilterTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events with the given decision.
    pub fn count(&self, decision: Decision) -> usize {
        self.events.iter().filter(|e| e.decision == decision).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Writes one line per event, indented by depth, with colored decisions.
    pub fn write_colored<W: WriteColor>(&self, out: &mut W) -> io::Result<()> {
        for event in &self.events {
            write!(out, "{}", "  ".repeat(event.depth))?;
            out.set_color(ColorSpec::new().set_fg(Some(event.decision.color())).set_bold(true))?;
            write!(out, "{:<14}", event.decision.as_str())?;
            out.reset()?;
            match &event.text {
                Some(text) => write!(out, " {} {:?}", event.name, text)?,
                None => write!(out, " {}", event.name)?,
            }
            writeln!(out, " -> {}", event.fragments)?;
        }
        Ok(())
    }
}

impl fmt::Display for FilterTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for event in &self.events {
            write!(f, "{}{:<14}", "  ".repeat(event.depth), event.decision.as_str())?;
            match &event.text {
                Some(text) => write!(f, " {} {:?}", event.name, text)?,
                None => write!(f, " {}", event.name)?,
            }
            writeln!(f, " -> {}", event.fragments)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::NoColor;

    fn event(depth: usize, decision: Decision) -> TraceEvent {
        TraceEvent {
            depth,
            name: "Symbol".into(),
            text: Some("x".into()),
            decision,
            fragments: 1,
        }
    }

    #[test]
    fn counts_by_decision() {
        let mut trace = FilterTrace::new();
        trace.record(event(1, Decision::KeptLeaf));
        trace.record(event(1, Decision::DroppedLeaf));
        trace.record(event(0, Decision::KeptLeaf));
        assert_eq!(trace.len(), 3);
        assert_eq!(trace.count(Decision::KeptLeaf), 2);
        assert_eq!(trace.count(Decision::Excluded), 0);
    }

    #[test]
    fn plain_and_colored_output_agree_without_color() {
        let mut trace = FilterTrace::new();
        trace.record(event(1, Decision::KeptLeaf));
        let mut buf = NoColor::new(Vec::new());
        trace.write_colored(&mut buf).unwrap();
        let colored = String::from_utf8(buf.into_inner()).unwrap();
        assert_eq!(colored, trace.to_string());
        assert_eq!(colored, "  keep           Symbol \"x\" -> 1\n");
    }
}
