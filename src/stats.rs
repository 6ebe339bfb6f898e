use std::collections::BTreeMap;

use serde::Serialize;

use crate::roster::{Probe, Status, Student};

/// One aggregate row per distinct class label present in the input.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSummary {
    pub class: String,
    pub student_count: usize,
    pub mean_ea: f64,
    pub mean_ec: f64,
    pub mean_ed: f64,
    pub pass_count: usize,
    pub fail_count: usize,
}

/// One grouped-bar value: mean of a probe over the students of one class
/// with one status. The front end renders these; nothing is drawn here.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarPoint {
    pub class: String,
    pub status: Status,
    pub mean: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeSeries {
    pub probe: Probe,
    pub title: String,
    pub bars: Vec<BarPoint>,
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut n = 0usize;
    for v in values {
        sum += v;
        n += 1;
    }
    if n > 0 {
        sum / n as f64
    } else {
        0.0
    }
}

/// Full recomputation on every call; rows ordered by ascending class label.
pub fn class_summaries(students: &[&Student]) -> Vec<ClassSummary> {
    let mut by_class: BTreeMap<&str, Vec<&Student>> = BTreeMap::new();
    for s in students {
        by_class.entry(s.class_label.as_str()).or_default().push(s);
    }

    by_class
        .into_iter()
        .map(|(class, group)| {
            let pass_count = group.iter().filter(|s| s.status == Status::Passed).count();
            ClassSummary {
                class: class.to_string(),
                student_count: group.len(),
                mean_ea: mean(group.iter().map(|s| s.ea)),
                mean_ec: mean(group.iter().map(|s| s.ec)),
                mean_ed: mean(group.iter().map(|s| s.ed)),
                pass_count,
                fail_count: group.len() - pass_count,
            }
        })
        .collect()
}

/// Bar series for one probe, or for all three when `probe` is `None`.
/// Bars ordered by class label, failed before passed within a class.
pub fn chart_series(students: &[&Student], probe: Option<Probe>) -> Vec<ProbeSeries> {
    let probes: Vec<Probe> = match probe {
        Some(p) => vec![p],
        None => Probe::ALL.to_vec(),
    };

    probes
        .into_iter()
        .map(|p| {
            let mut groups: BTreeMap<(&str, u8), Vec<f64>> = BTreeMap::new();
            for s in students {
                let status_key = match s.status {
                    Status::Failed => 0u8,
                    Status::Passed => 1u8,
                };
                groups
                    .entry((s.class_label.as_str(), status_key))
                    .or_default()
                    .push(s.probe(p));
            }

            let bars = groups
                .into_iter()
                .map(|((class, status_key), values)| BarPoint {
                    class: class.to_string(),
                    status: if status_key == 0 {
                        Status::Failed
                    } else {
                        Status::Passed
                    },
                    count: values.len(),
                    mean: mean(values.into_iter()),
                })
                .collect();

            ProbeSeries {
                probe: p,
                title: format!("Media pe probă {} per clasă", p.as_str()),
                bars,
            }
        })
        .collect()
}
