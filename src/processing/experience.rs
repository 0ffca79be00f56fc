//! Years-of-experience estimation
//!
//! Two strategies are tried in order: explicit statements ("5+ years of
//! experience") and aggregation of employment date ranges. Overlapping ranges
//! are merged before summing so concurrent roles are not double-counted.

use crate::processing::normalizer::{ResumeText, Section};
use chrono::{Datelike, NaiveDate};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceSource {
    ExplicitStatement,
    DateRanges,
}

/// Outcome of estimation; `NotFound` is distinct from zero years
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExperienceEstimate {
    Found { years: f64, source: ExperienceSource },
    NotFound,
}

impl ExperienceEstimate {
    pub fn years(&self) -> Option<f64> {
        match self {
            ExperienceEstimate::Found { years, .. } => Some(*years),
            ExperienceEstimate::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, ExperienceEstimate::Found { .. })
    }

    /// Wire form used by `experience_years`: "5", "3.5", or "0" when not found
    pub fn to_wire(&self) -> String {
        match self.years() {
            Some(years) if years.fract() == 0.0 => format!("{}", years as u64),
            Some(years) => format!("{:.1}", years),
            None => "0".to_string(),
        }
    }
}

impl fmt::Display for ExperienceEstimate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExperienceEstimate::Found { .. } => write!(f, "{} years", self.to_wire()),
            ExperienceEstimate::NotFound => write!(f, "not found"),
        }
    }
}

/// Half-open span in absolute months (`year * 12 + month0`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MonthSpan {
    pub start: i32,
    pub end: i32,
}

pub struct ExperienceEstimator {
    explicit_patterns: Vec<Regex>,
    range_regex: Regex,
    max_years: f64,
}

const MONTH: &str = r"jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

impl ExperienceEstimator {
    pub fn new(max_years: f64) -> Self {
        let explicit_patterns = [
            r"\b(\d{1,2})\s*\+\s*(?:years?|yrs?)\b",
            r"\b(\d{1,2})\s*(?:years?|yrs?)\s+(?:of\s+)?(?:(?:professional|industry|relevant|hands-on|work|working|total)\s+)?(?:experience|exp)\b",
            r"\b(?:experience|exp)\s*:?\s*(\d{1,2})\s*\+?\s*(?:years?|yrs?)\b",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("Invalid experience regex"))
        .collect();

        let date = format!(r"(?:(?:({m})\.?\s+)?((?:19|20)\d{{2}})|(\d{{1,2}})/((?:19|20)\d{{2}}))", m = MONTH);
        let end_date = format!(r"(?:(?:({m})\.?\s+)?((?:19|20)\d{{2}})|(\d{{1,2}})/((?:19|20)\d{{2}})|(present|current|now|today|date))", m = MONTH);
        let range_regex = Regex::new(&format!(
            r"\b{start}\s*(?:-|to|until|till)\s*{end}\b",
            start = date,
            end = end_date
        ))
        .expect("Invalid date range regex");

        Self {
            explicit_patterns,
            range_regex,
            max_years,
        }
    }

    /// Estimate experience, resolving "present" to `today`
    pub fn estimate(&self, text: &ResumeText, today: NaiveDate) -> ExperienceEstimate {
        if let Some(years) = self.explicit_years(text.text()) {
            return ExperienceEstimate::Found {
                years,
                source: ExperienceSource::ExplicitStatement,
            };
        }

        let spans = self.date_spans(text, today);
        let months = merged_months(spans);
        if months > 0 {
            let years = (months as f64 / 12.0 * 10.0).round() / 10.0;
            return ExperienceEstimate::Found {
                years: years.clamp(0.0, self.max_years),
                source: ExperienceSource::DateRanges,
            };
        }

        ExperienceEstimate::NotFound
    }

    /// Largest explicitly stated number of years; values above the cap are parsing artifacts
    pub fn explicit_years(&self, text: &str) -> Option<f64> {
        self.explicit_patterns
            .iter()
            .flat_map(|pattern| pattern.captures_iter(text))
            .filter_map(|caps| caps.get(1)?.as_str().parse::<u32>().ok())
            .map(f64::from)
            .filter(|years| *years > 0.0 && *years <= self.max_years)
            .reduce(f64::max)
    }

    /// Employment date ranges outside the education section
    pub fn date_spans(&self, text: &ResumeText, today: NaiveDate) -> Vec<MonthSpan> {
        let now = today.year() * 12 + today.month0() as i32;

        text.lines()
            .iter()
            .filter(|line| line.section != Section::Education)
            .flat_map(|line| self.range_regex.captures_iter(&line.text))
            .filter_map(|caps| {
                let start = parse_start(&caps)?;
                let end = parse_end(&caps, now)?;
                (start < end && start <= now).then(|| MonthSpan {
                    start,
                    end: end.min(now),
                })
            })
            .filter(|span| span.start < span.end)
            .collect()
    }
}

/// Total months covered by the spans, counting overlaps once
pub fn merged_months(mut spans: Vec<MonthSpan>) -> i32 {
    spans.sort();

    let mut total = 0;
    let mut current: Option<MonthSpan> = None;
    for span in spans {
        match current.as_mut() {
            Some(open) if span.start <= open.end => open.end = open.end.max(span.end),
            _ => {
                if let Some(done) = current.take() {
                    total += done.end - done.start;
                }
                current = Some(span);
            }
        }
    }
    if let Some(done) = current {
        total += done.end - done.start;
    }
    total
}

fn parse_start(caps: &Captures) -> Option<i32> {
    if let Some(year) = caps.get(2) {
        let month = caps.get(1).and_then(|m| month_index(m.as_str())).unwrap_or(0);
        return Some(year.as_str().parse::<i32>().ok()? * 12 + month);
    }
    let month = caps.get(3)?.as_str().parse::<i32>().ok()?;
    let year = caps.get(4)?.as_str().parse::<i32>().ok()?;
    (1..=12).contains(&month).then_some(year * 12 + month - 1)
}

fn parse_end(caps: &Captures, now: i32) -> Option<i32> {
    if caps.get(9).is_some() {
        return Some(now);
    }
    if let Some(year) = caps.get(6) {
        let month = caps.get(5).and_then(|m| month_index(m.as_str())).unwrap_or(0);
        return Some(year.as_str().parse::<i32>().ok()? * 12 + month);
    }
    let month = caps.get(7)?.as_str().parse::<i32>().ok()?;
    let year = caps.get(8)?.as_str().parse::<i32>().ok()?;
    (1..=12).contains(&month).then_some(year * 12 + month - 1)
}

fn month_index(name: &str) -> Option<i32> {
    let idx = match name.get(..3)? {
        "jan" => 0,
        "feb" => 1,
        "mar" => 2,
        "apr" => 3,
        "may" => 4,
        "jun" => 5,
        "jul" => 6,
        "aug" => 7,
        "sep" => 8,
        "oct" => 9,
        "nov" => 10,
        "dec" => 11,
        _ => return None,
    };
    Some(idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn estimate(text: &str) -> ExperienceEstimate {
        ExperienceEstimator::new(50.0).estimate(&ResumeText::new(text), today())
    }

    #[test]
    fn test_explicit_statement() {
        let result = estimate("5+ years of experience in Python, AWS, and Docker");
        assert_eq!(
            result,
            ExperienceEstimate::Found {
                years: 5.0,
                source: ExperienceSource::ExplicitStatement
            }
        );
        assert_eq!(result.to_wire(), "5");
    }

    #[test]
    fn test_largest_explicit_value_wins() {
        assert_eq!(estimate("3 years of experience with go; 7 yrs professional experience").years(), Some(7.0));
        assert_eq!(estimate("Experience: 4 years").years(), Some(4.0));
        assert_eq!(estimate("2-4 years of experience").years(), Some(4.0));
    }

    #[test]
    fn test_explicit_artifacts_are_rejected() {
        assert_eq!(estimate("99+ years of experience").years(), None);
    }

    #[test]
    fn test_overlapping_ranges_are_merged() {
        let result = estimate("Acme 2019 - 2021\nGlobex 2020 - 2022");
        assert_eq!(
            result,
            ExperienceEstimate::Found {
                years: 3.0,
                source: ExperienceSource::DateRanges
            }
        );
    }

    #[test]
    fn test_disjoint_ranges_are_summed() {
        let result = estimate("jan 2015 to jun 2016\nmarch 2018 - dec 2018");
        // 17 + 9 months
        assert_eq!(result.years(), Some(2.2));
        assert_eq!(result.to_wire(), "2.2");
    }

    #[test]
    fn test_present_resolves_to_reference_date() {
        let result = estimate("Senior Engineer, Jun 2020 - Present");
        assert_eq!(result.years(), Some(4.0));
    }

    #[test]
    fn test_numeric_month_format() {
        let result = estimate("01/2020 - 07/2021");
        assert_eq!(result.years(), Some(1.5));
    }

    #[test]
    fn test_education_ranges_are_ignored() {
        let result = estimate("Education\nBSc Computer Science 2012 - 2016");
        assert_eq!(result, ExperienceEstimate::NotFound);
    }

    #[test]
    fn test_invalid_ranges_are_dropped() {
        assert_eq!(estimate("2022 - 2019"), ExperienceEstimate::NotFound);
        assert_eq!(estimate("2030 - present"), ExperienceEstimate::NotFound);
        assert_eq!(estimate("13/2020 - 02/2021"), ExperienceEstimate::NotFound);
    }

    #[test]
    fn test_explicit_statement_beats_ranges() {
        let result = estimate("10+ years building systems\n2019 - 2020");
        assert_eq!(result.years(), Some(10.0));
    }

    #[test]
    fn test_not_found() {
        let result = estimate("");
        assert_eq!(result, ExperienceEstimate::NotFound);
        assert!(!result.is_found());
        assert_eq!(result.to_wire(), "0");
    }

    #[test]
    fn test_result_is_clamped() {
        let estimator = ExperienceEstimator::new(5.0);
        let result = estimator.estimate(&ResumeText::new("1990 - 2020"), today());
        assert_eq!(result.years(), Some(5.0));
    }

    #[test]
    fn test_merged_months() {
        let spans = vec![
            MonthSpan { start: 0, end: 10 },
            MonthSpan { start: 5, end: 12 },
            MonthSpan { start: 20, end: 22 },
            MonthSpan { start: 12, end: 14 },
        ];
        assert_eq!(merged_months(spans), 16);
        assert_eq!(merged_months(Vec::new()), 0);
    }
}
