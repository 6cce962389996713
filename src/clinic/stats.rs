//! Roster statistics: gender split and patients per attending doctor.

use crate::model::{Gender, Patient};

/// How many patients fall under `key`, and what share of the roster that is.
#[derive(Debug, Clone, PartialEq)]
pub struct Share<K> {
    pub key: K,
    pub count: usize,
    /// Percentage of the total, rounded to one decimal place.
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Stats {
    pub total: usize,
    /// One entry per gender, in [`Gender::all`] order, zero counts included.
    pub genders: Vec<Share<Gender>>,
    /// One entry per distinct doctor, most patients first.
    pub doctors: Vec<Share<String>>,
}

impl Stats {
    pub fn compute(patients: &[Patient]) -> Self {
        let total = patients.len();

        let genders = Gender::all()
            .iter()
            .map(|gender| {
                let count = patients.iter().filter(|p| p.gender == *gender).count();
                Share {
                    key: *gender,
                    count,
                    percent: percent_of(count, total),
                }
            })
            .collect();

        // First-seen order, so the stable sort below breaks ties by it.
        let mut doctors: Vec<(String, usize)> = Vec::new();
        for patient in patients {
            match doctors
                .iter_mut()
                .find(|(name, _)| *name == patient.attending_doctor)
            {
                Some((_, count)) => *count += 1,
                None => doctors.push((patient.attending_doctor.clone(), 1)),
            }
        }
        doctors.sort_by(|(_, a), (_, b)| b.cmp(a));

        Self {
            total,
            genders,
            doctors: doctors
                .into_iter()
                .map(|(key, count)| Share {
                    key,
                    count,
                    percent: percent_of(count, total),
                })
                .collect(),
        }
    }

    pub fn gender(&self, gender: Gender) -> Option<&Share<Gender>> {
        self.genders.iter().find(|s| s.key == gender)
    }
}

fn percent_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = count as f64 / total as f64 * 100.0;
    (raw * 10.0).round() / 10.0
}
