//! Unit test suite for properties of the public engine API
//!
//! These tests check invariants that must hold across many inputs rather than
//! single worked examples, which live next to the code in `#[cfg(test)]`
//! modules.
//!
//! ```bash
//! cargo test --test unit
//! ```

use minutes_cli::config::MinutesConfig;
use minutes_cli::models::{InputRecord, Person, TemplateId};
use minutes_cli::templating::formatters::{grouped_amount, ordinal};
use minutes_cli::templating::{
    Cleanup, EntryStyle, Pattern, RosterExpander, RuleTable, SectionContext,
};
use minutes_cli::test_utils::{RecordFixture, SLOT};
use std::collections::HashSet;

fn directors(count: usize) -> Vec<Person> {
    (0..count).map(|i| Person::new(format!("Director {i}"), format!("{:08}", 10_000_000 + i))).collect()
}

#[test]
fn test_ordinal_suffixes() {
    for n in 1..=1000_i64 {
        let rendered = ordinal(n);
        assert!(rendered.starts_with(&n.to_string()), "{rendered}");
        let expected = match (n % 10, n % 100) {
            (_, 11..=13) => "th",
            (1, _) => "st",
            (2, _) => "nd",
            (3, _) => "rd",
            _ => "th",
        };
        assert!(rendered.ends_with(expected), "ordinal({n}) = {rendered}");
    }
}

#[test]
fn test_grouped_amount_keeps_digits_and_groups() {
    let samples = [0_u64, 7, 99, 100, 1_000, 54_321, 150_000, 9_999_999, 10_000_000, 123_456_789_012];
    for n in samples {
        let grouped = grouped_amount(n);
        assert_eq!(grouped.replace(',', ""), n.to_string());

        let groups: Vec<&str> = grouped.split(',').collect();
        if let Some((last, rest)) = groups.split_last() {
            if !rest.is_empty() {
                assert_eq!(last.len(), 3, "{grouped}");
                assert!(rest[1..].iter().all(|g| g.len() == 2), "{grouped}");
                assert!((1..=2).contains(&rest[0].len()), "{grouped}");
            }
        }
    }
}

#[test]
fn test_cleanup_is_idempotent() {
    let headings = vec!["BOARD OF DIRECTORS MEETING".to_string()];
    let cleanup = Cleanup::new(&EntryStyle::default(), Some(2025), &headings);
    let nested = (0..20).fold("Mr. A (DIN: 1)".to_string(), |inner, _| {
        format!("Mr. Mr. A (DIN: 1) (DIN: {inner})")
    });
    let samples = [
        "",
        "plain text",
        nested.as_str(),
        "Mr. Mr. John Doe (DIN: 12345678) (DIN: Mr. John Doe (DIN: 12345678))",
        "1. 1. 1.\tMr. Asha Rao (DIN: 23456789)",
        "for FY 20___ and 20____ ending 31st March, 2020____",
        "BOARD OF DIRECTORS MEETING BOARD OF DIRECTORS MEETING  BOARD OF DIRECTORS MEETING",
        "many     spaces\tand\ttabs",
        "____ ___ __ _",
    ];
    for sample in samples {
        let once = cleanup.apply(sample);
        assert_eq!(cleanup.apply(&once), once, "not idempotent for {sample:?}");
    }
}

#[test]
fn test_rule_table_puts_longer_literals_first() {
    for fixture in [RecordFixture::board_meeting(), RecordFixture::minimal()] {
        let mut record = fixture.record().unwrap();
        for template in [TemplateId::Q1, TemplateId::Q2] {
            record.template = template;
            let table = RuleTable::for_record(&record, &MinutesConfig::default());
            let literals: Vec<&str> = table.literal_patterns().collect();

            let unique: HashSet<&str> = literals.iter().copied().collect();
            assert_eq!(unique.len(), literals.len(), "duplicate literal in {template} table");

            for (i, earlier) in literals.iter().enumerate() {
                for later in &literals[i + 1..] {
                    assert!(
                        !later.contains(earlier),
                        "{earlier:?} is applied before the longer {later:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_rule_table_generic_rule_is_last() {
    let record = RecordFixture::board_meeting().record().unwrap();
    let table = RuleTable::for_record(&record, &MinutesConfig::default());
    let last = table.iter().last().unwrap();
    assert!(matches!(last.pattern(), Pattern::Literal(p) if p == "[Manual]"));
}

#[test]
fn test_attendance_expansion_yields_one_line_per_director() {
    let expander = RosterExpander::new("[from MCA]", EntryStyle::default()).unwrap();
    for count in 1..=6 {
        let record = InputRecord {
            chairman_name: "Director 0".to_string(),
            present_directors: directors(count),
            ..InputRecord::default()
        };
        let template = (0..count)
            .map(|i| format!("{SLOT}\t{}", if i == 0 { "Chairman" } else { "Director" }))
            .collect::<Vec<_>>()
            .join("\n");

        let expanded = expander.expand(&template, SectionContext::Attendance, &record);
        let lines: Vec<&str> = expanded.lines().collect();
        assert_eq!(lines.len(), count);
        assert!(lines[0].ends_with("\tChairman"));
        assert!(lines[1..].iter().all(|l| l.ends_with("\tDirector")));
        assert!(!expanded.contains("[from MCA]"));
    }
}

#[test]
fn test_numbered_disclosure_slots_take_matching_entries() {
    let expander = RosterExpander::new("[from MCA]", EntryStyle::default()).unwrap();
    let record = InputRecord {
        interest_disclosures: directors(4),
        ..InputRecord::default()
    };
    for n in 1..=4 {
        let expanded = expander.expand(&format!("{n}.\t{SLOT}"), SectionContext::InterestDisclosure, &record);
        let index = n - 1;
        assert_eq!(expanded, format!("{n}.\tMr. Director {index} (DIN: {:08})", 10_000_000 + index));
    }

    // Beyond the roster the slot stays for the diagnostics to report.
    let beyond = expander.expand(&format!("5.\t{SLOT}"), SectionContext::InterestDisclosure, &record);
    assert!(beyond.contains("[from MCA]"));
}

#[test]
fn test_context_carries_until_next_trigger() {
    let texts = [
        ("Opening remarks", SectionContext::None),
        ("The following Directors were present:", SectionContext::Attendance),
        ("Some other paragraph", SectionContext::Attendance),
        ("Disclosure of interest by directors", SectionContext::InterestDisclosure),
        ("1. somebody", SectionContext::InterestDisclosure),
        ("Declaration under Section 164(2)", SectionContext::Disqualification),
        ("", SectionContext::Disqualification),
    ];

    let mut context = SectionContext::default();
    for (text, expected) in texts {
        context = context.classify(text);
        assert_eq!(context, expected, "after {text:?}");
    }
}
