//! # Rendering
//!
//! Everything here returns a `String`; callers decide whether it goes to
//! stdout or to the menu's writer. Column math is Unicode-aware because
//! names and addresses are routinely Cyrillic.

use super::styles::{HEADING, ID, LABEL, MISSING, RULE};
use clinic::api::{CmdMessage, MessageLevel};
use clinic::error::ClinicError;
use clinic::model::Patient;
use clinic::stats::Stats;
use colored::Colorize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const CARD_WIDTH: usize = 50;
const TABLE_COLUMNS: [(&str, usize); 5] = [
    ("ID", 5),
    ("Name", 30),
    ("Birth date", 15),
    ("Phone", 15),
    ("Doctor", 20),
];
const NOT_PROVIDED: &str = "not provided";

pub fn render_messages(messages: &[CmdMessage]) -> String {
    messages
        .iter()
        .map(|message| match message.level {
            MessageLevel::Info => message.content.dimmed().to_string(),
            MessageLevel::Success => message.content.green().to_string(),
            MessageLevel::Warning => message.content.yellow().to_string(),
            MessageLevel::Error => message.content.red().to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_error(err: &ClinicError) -> String {
    format!("Error: {}", err).red().to_string()
}

pub fn render_patient_card(patient: &Patient) -> String {
    let rule = RULE.apply_to("=".repeat(CARD_WIDTH)).to_string();
    let optional = |value: &Option<String>| match value {
        Some(v) => v.clone(),
        None => MISSING.apply_to(NOT_PROVIDED).to_string(),
    };

    let rows = [
        ("ID", ID.apply_to(patient.id).to_string()),
        ("Birth date", patient.birth_date.clone()),
        ("Gender", patient.gender.to_string()),
        ("Address", patient.address.clone()),
        ("Phone", patient.phone.clone()),
        ("Email", optional(&patient.email)),
        ("Insurance number", patient.insurance_number.clone()),
        ("Registered", patient.registration_date.clone()),
        ("Medical history", patient.medical_history.clone()),
        ("Diagnosis", patient.diagnosis.clone()),
        ("Attending doctor", patient.attending_doctor.clone()),
    ];

    let mut lines = vec![
        rule.clone(),
        HEADING
            .apply_to(format!("PATIENT: {}", patient.full_name()))
            .to_string(),
        rule.clone(),
    ];
    lines.extend(
        rows.into_iter()
            .map(|(label, value)| format!("{}: {}", LABEL.apply_to(label), value)),
    );
    lines.push(rule);
    lines.join("\n")
}

pub fn render_patient_table(patients: &[Patient]) -> String {
    let line_width: usize = TABLE_COLUMNS.iter().map(|(_, w)| w).sum();

    let header: String = TABLE_COLUMNS
        .iter()
        .map(|(title, width)| pad_to_width(title, *width))
        .collect();

    let mut lines = vec![
        HEADING
            .apply_to(format!("Patients (total: {})", patients.len()))
            .to_string(),
        LABEL.apply_to(header.trim_end()).to_string(),
        RULE.apply_to("-".repeat(line_width)).to_string(),
    ];

    for patient in patients {
        let cells = [
            patient.id.to_string(),
            patient.short_name(),
            patient.birth_date.clone(),
            patient.phone.clone(),
            patient.attending_doctor.clone(),
        ];
        let line: String = cells
            .iter()
            .zip(TABLE_COLUMNS.iter())
            .enumerate()
            .map(|(i, (cell, (_, width)))| {
                let padded = pad_to_width(cell, *width);
                if i == 0 {
                    ID.apply_to(padded).to_string()
                } else {
                    padded
                }
            })
            .collect();
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

pub fn render_stats(stats: &Stats) -> String {
    let mut lines = vec![
        HEADING.apply_to("Clinic statistics").to_string(),
        format!("{}: {}", LABEL.apply_to("Total patients"), stats.total),
        String::new(),
        LABEL.apply_to("By gender:").to_string(),
    ];

    for share in &stats.genders {
        lines.push(format!(
            "  {}: {} ({:.1}%)",
            share.key, share.count, share.percent
        ));
    }

    lines.push(String::new());
    lines.push(LABEL.apply_to("By attending doctor:").to_string());
    for share in &stats.doctors {
        let doctor = if share.key.is_empty() {
            MISSING.apply_to("unassigned").to_string()
        } else {
            share.key.clone()
        };
        lines.push(format!(
            "  {}: {} ({:.1}%)",
            doctor,
            patient_count(share.count),
            share.percent
        ));
    }

    lines.join("\n")
}

pub fn render_menu() -> String {
    let rule = RULE.apply_to("=".repeat(CARD_WIDTH)).to_string();
    let items = [
        "1. List all patients",
        "2. Add a patient",
        "3. Find patients",
        "4. Edit a patient",
        "5. Delete a patient",
        "6. Statistics",
        "7. Save data",
        "8. Reload data",
        "0. Exit",
    ];

    let mut lines = vec![
        rule.clone(),
        HEADING.apply_to("CLINIC PATIENT REGISTRY").to_string(),
        rule.clone(),
    ];
    lines.extend(items.iter().map(|item| item.to_string()));
    lines.push(rule);
    lines.join("\n")
}

fn patient_count(count: usize) -> String {
    if count == 1 {
        "1 patient".to_string()
    } else {
        format!("{} patients", count)
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    let mut cell = truncate_to_width(s, width.saturating_sub(1));
    let used = cell.width();
    cell.push_str(&" ".repeat(width.saturating_sub(used)));
    cell
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }

    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic::model::Gender;

    fn patient(id: u32, last: &str, first: &str, doctor: &str) -> Patient {
        Patient {
            id,
            last_name: last.to_string(),
            first_name: first.to_string(),
            middle_name: None,
            birth_date: "01.02.1980".to_string(),
            gender: Gender::Female,
            address: "Main st 1".to_string(),
            phone: "555-01".to_string(),
            email: None,
            insurance_number: "INS-1".to_string(),
            registration_date: "10.10.2024 09:30".to_string(),
            medical_history: String::new(),
            diagnosis: "Flu".to_string(),
            attending_doctor: doctor.to_string(),
        }
    }

    fn strip(s: &str) -> String {
        console::strip_ansi_codes(s).to_string()
    }

    #[test]
    fn truncates_wide_text() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        assert_eq!(truncate_to_width("Иванов", 4), "Ива…");
    }

    #[test]
    fn pads_cyrillic_by_display_width() {
        let cell = pad_to_width("Петров", 10);
        assert_eq!(cell.width(), 10);
        assert!(cell.starts_with("Петров"));
    }

    #[test]
    fn table_lists_each_patient() {
        let patients = vec![
            patient(1, "Smith", "Anna", "Dr. Grey"),
            patient(2, "Петрова", "Мария", "Др. Сидоров"),
        ];
        let out = strip(&render_patient_table(&patients));

        assert!(out.contains("Patients (total: 2)"));
        assert!(out.contains("Smith A."));
        assert!(out.contains("Петрова М."));
        assert!(out.contains("Dr. Grey"));
        assert_eq!(out.lines().count(), 5);
    }

    #[test]
    fn card_marks_missing_email() {
        let out = strip(&render_patient_card(&patient(3, "Smith", "Anna", "Dr. Grey")));
        assert!(out.contains("PATIENT: Smith Anna"));
        assert!(out.contains("Email: not provided"));
        assert!(out.contains("Registered: 10.10.2024 09:30"));
    }

    #[test]
    fn stats_show_percentages() {
        let patients = vec![
            patient(1, "A", "A", "Dr. Grey"),
            patient(2, "B", "B", "Dr. Grey"),
            patient(3, "C", "C", ""),
        ];
        let out = strip(&render_stats(&Stats::compute(&patients)));

        assert!(out.contains("Total patients: 3"));
        assert!(out.contains("Female: 3 (100.0%)"));
        assert!(out.contains("Male: 0 (0.0%)"));
        assert!(out.contains("Dr. Grey: 2 patients (66.7%)"));
        assert!(out.contains("unassigned: 1 patient (33.3%)"));
        assert!(!out.contains("1 patients"));
    }

    #[test]
    fn doctor_lines_carry_share_of_roster() {
        let mut patients = vec![
            patient(1, "A", "A", "A"),
            patient(2, "B", "B", "A"),
            patient(3, "C", "C", "B"),
        ];
        patients[0].gender = Gender::Male;
        patients[1].gender = Gender::Male;
        let out = strip(&render_stats(&Stats::compute(&patients)));

        assert!(out.contains("Male: 2 (66.7%)"));
        assert!(out.contains("A: 2 patients (66.7%)"));
        assert!(out.contains("B: 1 patient (33.3%)"));
        assert!(out.find("A: 2 patients").unwrap() < out.find("B: 1 patient").unwrap());
    }

    #[test]
    fn messages_keep_order() {
        let out = strip(&render_messages(&[
            CmdMessage::info("first"),
            CmdMessage::error("second"),
        ]));
        assert_eq!(out, "first\nsecond");
    }
}
