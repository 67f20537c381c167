//! Console output formatter for governance results

use crate::output::formatter::Report;
use crate::output::report::{
    AttendanceReport, PreferenceReport, ProxyDirection, ProxyListReport, ProxyReport,
    QuorumReport, RankingReport, SelectionReport, TallyReport, VoteReport, WeightsReport,
};
use colored::{ColoredString, Colorize};
use condo_domain::Proxy;

/// Shared console building blocks
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    fn row(label: &str, value: impl std::fmt::Display) -> String {
        format!("  {:<28} {}\n", format!("{}:", label).dimmed(), value)
    }

    fn verdict(ok: bool, yes: &str, no: &str) -> ColoredString {
        if ok {
            yes.green().bold()
        } else {
            no.red().bold()
        }
    }

    /// Format a weight with two decimals
    pub fn weight(value: f64) -> String {
        format!("{:.2}", value)
    }

    /// Format a share as a percentage with two decimals
    pub fn percent(value: f64) -> String {
        format!("{:.2}%", value)
    }

    fn proxy_line(proxy: &Proxy) -> String {
        let scope = proxy
            .meeting_id
            .as_ref()
            .map(|m| format!("meeting {}", m))
            .unwrap_or_else(|| "general".to_string());
        let until = proxy
            .valid_until
            .map(|t| format!(" until {}", t.format("%Y-%m-%d %H:%M")))
            .unwrap_or_default();
        format!(
            "{} {} {} {} [{}]{}",
            proxy.id.to_string().dimmed(),
            proxy.grantor_id,
            "->".cyan(),
            proxy.grantee_id,
            scope,
            until
        )
    }
}

impl Report for QuorumReport<'_> {
    fn format_full(&self) -> String {
        let r = self.result;
        let mut output = String::new();

        output.push_str(&ConsoleFormatter::header(&format!("Quorum: {}", self.meeting)));
        output.push('\n');

        output.push_str(&ConsoleFormatter::section_header("Weight"));
        output.push_str(&ConsoleFormatter::row(
            "Total eligible",
            ConsoleFormatter::weight(r.total_weight),
        ));
        output.push_str(&ConsoleFormatter::row(
            "Present",
            ConsoleFormatter::weight(r.present_weight),
        ));
        output.push_str(&ConsoleFormatter::row(
            "Delegated by absentees",
            ConsoleFormatter::weight(r.proxy_weight),
        ));
        output.push_str(&ConsoleFormatter::row(
            "Effective present",
            ConsoleFormatter::weight(r.effective_present_weight),
        ));

        output.push_str(&ConsoleFormatter::section_header("Members"));
        output.push_str(&ConsoleFormatter::row(
            "Present",
            format!("{} of {}", r.present_members, r.total_members),
        ));

        output.push_str(&ConsoleFormatter::section_header("Result"));
        output.push_str(&ConsoleFormatter::row(
            "Quorum",
            format!(
                "{} (required {})",
                ConsoleFormatter::percent(r.quorum_percentage),
                ConsoleFormatter::percent(r.required_percentage)
            ),
        ));
        if !r.quorum_reached && r.total_weight > 0.0 {
            output.push_str(&ConsoleFormatter::row(
                "Missing weight",
                ConsoleFormatter::weight(r.missing_weight()),
            ));
        }
        output.push_str(&format!(
            "\n  {}\n",
            ConsoleFormatter::verdict(r.quorum_reached, "QUORUM REACHED", "QUORUM NOT REACHED")
        ));

        output.push_str(&ConsoleFormatter::footer());
        output
    }

    fn format_summary(&self) -> String {
        let r = self.result;
        format!(
            "{} {}: {} of {} required ({} / {})\n",
            ConsoleFormatter::verdict(r.quorum_reached, "REACHED", "NOT REACHED"),
            self.meeting,
            ConsoleFormatter::percent(r.quorum_percentage),
            ConsoleFormatter::percent(r.required_percentage),
            ConsoleFormatter::weight(r.effective_present_weight),
            ConsoleFormatter::weight(r.total_weight),
        )
    }
}

impl Report for WeightsReport<'_> {
    fn format_full(&self) -> String {
        let mut output = String::new();
        output.push_str(&ConsoleFormatter::header(&format!("Weights: {}", self.meeting)));
        output.push('\n');
        output.push_str(&format!(
            "\n  {:<16} {:>8} {:>8} {:>8} {:>10} {:>8}\n",
            "Member".bold(),
            "Own".bold(),
            "Present".bold(),
            "Proxies".bold(),
            "Effective".bold(),
            "Power".bold()
        ));
        for w in self.members {
            output.push_str(&format!(
                "  {:<16} {:>8} {:>8} {:>8} {:>10} {:>8}\n",
                w.member_id.as_str(),
                ConsoleFormatter::weight(w.own_weight),
                if w.present { "yes" } else { "-" },
                w.proxies_held,
                ConsoleFormatter::weight(w.effective_weight),
                ConsoleFormatter::weight(w.voting_power)
            ));
        }
        output.push_str(&ConsoleFormatter::footer());
        output
    }

    fn format_summary(&self) -> String {
        let present = self.members.iter().filter(|w| w.present).count();
        let effective: f64 = self.members.iter().map(|w| w.effective_weight).sum();
        format!(
            "{}: {} eligible members, {} present, effective weight {}\n",
            self.meeting,
            self.members.len(),
            present,
            ConsoleFormatter::weight(effective)
        )
    }
}

impl Report for TallyReport<'_> {
    fn format_full(&self) -> String {
        let r = self.result;
        let mut output = String::new();

        output.push_str(&ConsoleFormatter::header(&format!("Tally: {}", self.item)));
        output.push('\n');

        output.push_str(&ConsoleFormatter::section_header("Weighted votes"));
        output.push_str(&ConsoleFormatter::row("Yes", ConsoleFormatter::weight(r.yes)));
        output.push_str(&ConsoleFormatter::row("No", ConsoleFormatter::weight(r.no)));
        output.push_str(&ConsoleFormatter::row(
            "Abstain",
            ConsoleFormatter::weight(r.abstain),
        ));
        output.push_str(&ConsoleFormatter::row(
            "Counted weight",
            ConsoleFormatter::weight(r.total_weight),
        ));
        output.push_str(&ConsoleFormatter::row("Ballots", r.total_votes));

        if !r.choices.is_empty() {
            output.push_str(&ConsoleFormatter::section_header("Options"));
            for (label, weight) in &r.choices {
                output.push_str(&ConsoleFormatter::row(label, ConsoleFormatter::weight(*weight)));
            }
            if let Some((label, _)) = r.leading_option() {
                output.push_str(&ConsoleFormatter::row("Leading", label.yellow().bold()));
            }
        }

        output.push_str(&ConsoleFormatter::section_header("Result"));
        output.push_str(&ConsoleFormatter::row("Rule", r.majority.description()));
        output.push_str(&format!(
            "\n  {}\n",
            ConsoleFormatter::verdict(r.passed, "PASSED", "FAILED")
        ));

        output.push_str(&ConsoleFormatter::footer());
        output
    }

    fn format_summary(&self) -> String {
        let r = self.result;
        format!(
            "{} {}: yes {} / no {} / abstain {} ({})\n",
            ConsoleFormatter::verdict(r.passed, "PASSED", "FAILED"),
            self.item,
            ConsoleFormatter::weight(r.yes),
            ConsoleFormatter::weight(r.no),
            ConsoleFormatter::weight(r.abstain),
            r.majority
        )
    }
}

impl Report for VoteReport<'_> {
    fn format_full(&self) -> String {
        let v = self.vote;
        let on_behalf = v
            .proxy_for
            .as_ref()
            .map(|grantor| format!(" on behalf of {}", grantor))
            .unwrap_or_default();
        format!(
            "{} {} voted {} on {}{} (weight {})\n",
            "Recorded:".green().bold(),
            v.member_id,
            v.choice.to_string().bold(),
            v.agenda_item_id,
            on_behalf,
            ConsoleFormatter::weight(v.weight)
        )
    }
}

impl Report for ProxyListReport<'_> {
    fn format_full(&self) -> String {
        let title = match self.direction {
            ProxyDirection::Incoming => format!("Proxies held by {}", self.member),
            ProxyDirection::Outgoing => format!("Proxies given by {}", self.member),
        };
        let mut output = ConsoleFormatter::section_header(&format!("{} ({})", title, self.meeting));
        if self.proxies.is_empty() {
            output.push_str(&format!("  {}\n", "none".dimmed()));
        }
        for proxy in self.proxies {
            output.push_str(&format!("  {}\n", ConsoleFormatter::proxy_line(proxy)));
        }
        output
    }

    fn format_summary(&self) -> String {
        let lines: Vec<String> = self
            .proxies
            .iter()
            .map(ConsoleFormatter::proxy_line)
            .collect();
        if lines.is_empty() {
            format!("{}: no active proxies\n", self.member)
        } else {
            format!("{}\n", lines.join("\n"))
        }
    }
}

impl Report for ProxyReport<'_> {
    fn format_full(&self) -> String {
        let mut output = format!(
            "{} {}\n",
            format!("Proxy {}:", self.action).green().bold(),
            ConsoleFormatter::proxy_line(self.proxy)
        );
        if let Some(document) = &self.proxy.document_ref {
            output.push_str(&ConsoleFormatter::row("Document", document));
        }
        output
    }
}

impl Report for AttendanceReport<'_> {
    fn format_full(&self) -> String {
        let a = self.attendance;
        match a.checked_out_at {
            None => format!(
                "{} {} at {} ({:?}, weight {})\n",
                "Checked in:".green().bold(),
                a.member_id,
                a.meeting_id,
                a.kind,
                ConsoleFormatter::weight(a.weight_snapshot)
            ),
            Some(at) => format!(
                "{} {} left {} at {}\n",
                "Checked out:".yellow().bold(),
                a.member_id,
                a.meeting_id,
                at.format("%H:%M")
            ),
        }
    }
}

impl Report for RankingReport<'_> {
    fn format_full(&self) -> String {
        let mut output = String::new();
        output.push_str(&ConsoleFormatter::header(&format!("Dates: {}", self.meeting)));
        output.push('\n');

        if self.ranking.is_empty() {
            output.push_str(&format!("\n  {}\n", "No candidate dates".dimmed()));
        }
        for (rank, score) in self.ranking.iter().enumerate() {
            let option = self.option(score);
            let when = option
                .map(|o| o.starts_at.format("%a %Y-%m-%d %H:%M").to_string())
                .unwrap_or_default();
            let selected = if option.is_some_and(|o| o.selected) {
                " *selected*".green().bold().to_string()
            } else {
                String::new()
            };
            let line = format!(
                "{:>2}. {:<12} {:<22} score {:>3}  (yes {}, maybe {}, no {}){}",
                rank + 1,
                score.option_id.as_str(),
                when,
                score.score,
                score.yes,
                score.maybe,
                score.no,
                selected
            );
            if rank == 0 {
                output.push_str(&format!("\n  {}", line.bold()));
            } else {
                output.push_str(&format!("\n  {}", line));
            }
        }
        output.push('\n');
        output.push_str(&ConsoleFormatter::footer());
        output
    }

    fn format_summary(&self) -> String {
        match self.ranking.first() {
            Some(best) => format!(
                "Best date for {}: {} (score {})\n",
                self.meeting, best.option_id, best.score
            ),
            None => format!("{}: no candidate dates\n", self.meeting),
        }
    }
}

impl Report for PreferenceReport<'_> {
    fn format_full(&self) -> String {
        format!(
            "{} {} answered {} for {} ({})\n",
            "Recorded:".green().bold(),
            self.vote.member_id,
            self.vote.preference.to_string().bold(),
            self.vote.option_id,
            self.meeting
        )
    }
}

impl Report for SelectionReport<'_> {
    fn format_full(&self) -> String {
        format!(
            "{} {} on {} ({} min) for {}\n",
            "Selected:".green().bold(),
            self.selected.id,
            self.selected.starts_at.format("%a %Y-%m-%d %H:%M"),
            self.selected.duration_minutes,
            self.meeting
        )
    }
}
