use crate::roster::{Roster, RosterNumber};
use console::style;
use regroup::{ConflictScore, PairWeights};
use std::fmt::Write;

pub fn pretty(label: &str, message: &str) {
    println!("{:>12} {}", style(label).bold().green(), message);
}

pub fn warn(label: &str, message: &str) {
    println!("{:>12} {}", style(label).bold().yellow(), message);
}

fn display_name(roster: &Roster, number: RosterNumber) -> String {
    match roster.name_of(number) {
        Some(name) => format!("{} ({})", name, number),
        None => number.to_string(),
    }
}

/// `cedar: Ada (1), Ben (2), Cy (3)` style line for one group.
pub fn describe_group(roster: &Roster, label: &str, members: &[RosterNumber]) -> String {
    let names: Vec<String> = members
        .iter()
        .map(|&number| display_name(roster, number))
        .collect();
    format!("{}: {}", label, names.join(", "))
}

pub fn print_assignment(
    roster: &Roster,
    session_label: &str,
    groups: &[(String, Vec<RosterNumber>)],
    scores: &[ConflictScore],
    total: ConflictScore,
) {
    pretty("Session", session_label);
    for ((label, members), score) in groups.iter().zip(scores) {
        let line = describe_group(roster, label, members);
        if *score > 0 {
            warn("Group", &format!("{} [conflict score {}]", line, score));
        } else {
            pretty("Group", &line);
        }
    }
    if total > 0 {
        warn("Conflicts", &format!("total conflict score {}", total));
    } else {
        pretty("Conflicts", "none");
    }
}

pub fn print_absent(roster: &Roster, absent: &[RosterNumber]) {
    if absent.is_empty() {
        return;
    }
    let names: Vec<String> = absent
        .iter()
        .map(|&number| display_name(roster, number))
        .collect();
    pretty("Absent", &names.join(", "));
}

/// How often each pair of participants has shared a group, one row per participant.
pub fn pairing_matrix(
    roster: &Roster,
    weights: &PairWeights<RosterNumber>,
) -> Result<String, std::fmt::Error> {
    let numbers = roster.roster_numbers();
    let names: Vec<&str> = roster.participants.iter().map(|p| p.name.as_str()).collect();
    let matrix = weights.matrix(&numbers);

    let name_width = names.iter().map(|n| n.chars().count()).max().unwrap_or(0);
    let cell_width = names
        .iter()
        .map(|n| n.chars().count())
        .chain(
            matrix
                .iter()
                .flatten()
                .map(|count| count.to_string().len()),
        )
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    write!(out, "{:name_width$}", "")?;
    for name in &names {
        write!(out, " {:>cell_width$}", name)?;
    }
    writeln!(out)?;
    for (name, row) in names.iter().zip(&matrix) {
        write!(out, "{:name_width$}", name)?;
        for count in row {
            write!(out, " {:>cell_width$}", count)?;
        }
        writeln!(out)?;
    }
    Ok(out)
}
