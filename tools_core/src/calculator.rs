//! Form-style calculators: loan EMI, SIP projection, BMI, exact age.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalcError {
    #[error("term must be at least one period")]
    ZeroTerm,

    #[error("amounts and rates must be positive")]
    NonPositiveInput,

    #[error("date of birth lies in the future")]
    FutureDate,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct EmiBreakdown {
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
}

/// Equated monthly installment for a loan.
///
/// `annual_rate_pct` is the nominal yearly rate in percent; a zero rate
/// degenerates to straight division of the principal.
pub fn emi(principal: f64, annual_rate_pct: f64, months: u32) -> Result<EmiBreakdown, CalcError> {
    if months == 0 {
        return Err(CalcError::ZeroTerm);
    }
    if principal <= 0.0 || annual_rate_pct < 0.0 {
        return Err(CalcError::NonPositiveInput);
    }

    let monthly_payment = if annual_rate_pct == 0.0 {
        principal / months as f64
    } else {
        let rate = annual_rate_pct / 12.0 / 100.0;
        let growth = (1.0 + rate).powi(months as i32);
        principal * rate * growth / (growth - 1.0)
    };
    let total_payment = monthly_payment * months as f64;

    Ok(EmiBreakdown {
        monthly_payment,
        total_payment,
        total_interest: total_payment - principal,
    })
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct SipProjection {
    pub future_value: f64,
    pub total_invested: f64,
    pub estimated_gain: f64,
}

/// Future value of a recurring monthly investment with returns compounding
/// monthly and each installment paid at the start of the period.
pub fn sip(
    monthly_investment: f64,
    annual_rate_pct: f64,
    years: u32,
) -> Result<SipProjection, CalcError> {
    if years == 0 {
        return Err(CalcError::ZeroTerm);
    }
    if monthly_investment <= 0.0 || annual_rate_pct < 0.0 {
        return Err(CalcError::NonPositiveInput);
    }

    let months = (years * 12) as f64;
    let future_value = if annual_rate_pct == 0.0 {
        monthly_investment * months
    } else {
        let i = annual_rate_pct / 100.0 / 12.0;
        monthly_investment * (((1.0 + i).powf(months) - 1.0) / i) * (1.0 + i)
    };
    let total_invested = monthly_investment * months;

    Ok(SipProjection {
        future_value,
        total_invested,
        estimated_gain: future_value - total_invested,
    })
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BmiReading {
    pub value: f64,
    pub category: &'static str,
}

pub fn bmi(weight_kg: f64, height_cm: f64) -> Result<BmiReading, CalcError> {
    if weight_kg <= 0.0 || height_cm <= 0.0 {
        return Err(CalcError::NonPositiveInput);
    }
    let meters = height_cm / 100.0;
    let value = weight_kg / (meters * meters);
    let category = match value {
        v if v < 18.5 => "Underweight",
        v if v < 25.0 => "Normal",
        v if v < 30.0 => "Overweight",
        _ => "Obese",
    };
    Ok(BmiReading { value, category })
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Age {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

/// Exact age on `today`, as calendar years/months/days.
///
/// Day and month deficits borrow from the month preceding `today`, so the
/// result is what a person would state as their age on that date.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> Result<Age, CalcError> {
    if date_of_birth > today {
        return Err(CalcError::FutureDate);
    }

    let mut years = today.year() - date_of_birth.year();
    let mut months = today.month() as i32 - date_of_birth.month() as i32;
    let mut days = today.day() as i32 - date_of_birth.day() as i32;

    if days < 0 {
        months -= 1;
        days += days_in_previous_month(today);
    }
    if months < 0 {
        years -= 1;
        months += 12;
    }

    Ok(Age {
        years,
        months,
        days,
    })
}

fn days_in_previous_month(date: NaiveDate) -> i32 {
    let (year, month) = if date.month() == 1 {
        (date.year() - 1, 12)
    } else {
        (date.year(), date.month() - 1)
    };
    days_in_month(year, month)
}

fn days_in_month(year: i32, month: u32) -> i32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 {
                29
            } else {
                28
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn emi_matches_the_standard_amortization_formula() {
        // 100000 at 10% over 12 months.
        let result = emi(100_000.0, 10.0, 12).unwrap();
        assert!((result.monthly_payment - 8_791.59).abs() < 0.01);
        assert!((result.total_payment - 105_499.06).abs() < 0.1);
        assert!((result.total_interest - 5_499.06).abs() < 0.1);
    }

    #[test]
    fn emi_with_zero_rate_divides_evenly() {
        let result = emi(12_000.0, 0.0, 12).unwrap();
        assert_eq!(result.monthly_payment, 1_000.0);
        assert_eq!(result.total_interest, 0.0);
    }

    #[test]
    fn emi_rejects_degenerate_input() {
        assert_eq!(emi(100_000.0, 10.0, 0), Err(CalcError::ZeroTerm));
        assert_eq!(emi(0.0, 10.0, 12), Err(CalcError::NonPositiveInput));
        assert_eq!(emi(100.0, -1.0, 12), Err(CalcError::NonPositiveInput));
    }

    #[test]
    fn sip_projects_monthly_compounding() {
        // 5000/month at 12% over 10 years.
        let result = sip(5_000.0, 12.0, 10).unwrap();
        assert_eq!(result.total_invested, 600_000.0);
        assert!((result.future_value - 1_161_695.38).abs() < 1.0);
        assert!((result.estimated_gain - 561_695.38).abs() < 1.0);
    }

    #[test]
    fn sip_with_zero_rate_returns_contributions() {
        let result = sip(1_000.0, 0.0, 2).unwrap();
        assert_eq!(result.future_value, 24_000.0);
        assert_eq!(result.estimated_gain, 0.0);
    }

    #[test]
    fn bmi_value_and_category() {
        let reading = bmi(70.0, 170.0).unwrap();
        assert!((reading.value - 24.22).abs() < 0.01);
        assert_eq!(reading.category, "Normal");

        assert_eq!(bmi(50.0, 175.0).unwrap().category, "Underweight");
        assert_eq!(bmi(85.0, 170.0).unwrap().category, "Overweight");
        assert_eq!(bmi(100.0, 170.0).unwrap().category, "Obese");
        assert_eq!(bmi(0.0, 170.0), Err(CalcError::NonPositiveInput));
    }

    #[test]
    fn age_counts_whole_years() {
        let age = age_on(date(1990, 6, 15), date(2026, 6, 15)).unwrap();
        assert_eq!(age, Age { years: 36, months: 0, days: 0 });
    }

    #[test]
    fn age_borrows_days_from_the_previous_month() {
        // Previous month relative to 2026-03-10 is February (28 days).
        let age = age_on(date(2000, 1, 20), date(2026, 3, 10)).unwrap();
        assert_eq!(age, Age { years: 26, months: 1, days: 18 });
    }

    #[test]
    fn age_borrows_months_across_the_year_boundary() {
        let age = age_on(date(2000, 11, 5), date(2026, 3, 5)).unwrap();
        assert_eq!(age, Age { years: 25, months: 4, days: 0 });
    }

    #[test]
    fn age_handles_leap_february() {
        let age = age_on(date(2004, 2, 29), date(2026, 3, 1)).unwrap();
        assert_eq!(age, Age { years: 22, months: 0, days: 0 });
    }

    #[test]
    fn age_rejects_future_birth_dates() {
        assert_eq!(
            age_on(date(2030, 1, 1), date(2026, 1, 1)),
            Err(CalcError::FutureDate)
        );
    }
}
