use crate::domain::model::{Customer, CustomerServiceUsage, Discount, PriceBreakdown};
use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;

/// Total owed by `customer` for `start_date..=end_date`, free days included.
pub fn calculate_total_price(start_date: NaiveDate, end_date: NaiveDate, customer: &Customer) -> Decimal {
    let daily_costs = compute_daily_costs(start_date, end_date, customer);
    apply_free_days(daily_costs, customer.global_free_days)
}

pub fn calculate_breakdown(
    start_date: NaiveDate,
    end_date: NaiveDate,
    customer: &Customer,
) -> PriceBreakdown {
    let daily_costs = compute_daily_costs(start_date, end_date, customer);
    let chargeable_days = daily_costs.len();
    let subtotal: Decimal = daily_costs.iter().sum();
    let free_days_applied = (customer.global_free_days as usize).min(chargeable_days);

    PriceBreakdown {
        chargeable_days,
        free_days_applied,
        subtotal,
        total_price: apply_free_days(daily_costs, customer.global_free_days),
    }
}

/// One entry per day in the range that cost something; zero-cost days are left out.
pub fn compute_daily_costs(start_date: NaiveDate, end_date: NaiveDate, customer: &Customer) -> Vec<Decimal> {
    // succ_opt stops after NaiveDate::MAX instead of skipping it
    std::iter::successors(Some(start_date), |date| date.succ_opt())
        .take_while(|date| *date <= end_date)
        .map(|date| single_day_cost(date, customer))
        .filter(|cost| *cost > Decimal::ZERO)
        .collect()
}

pub fn single_day_cost(date: NaiveDate, customer: &Customer) -> Decimal {
    let total: Decimal = customer
        .service_usages
        .iter()
        .filter(|usage| usage.start_date <= date)
        .filter_map(|usage| usage_cost(date, usage, &customer.discounts))
        .sum();
    tracing::trace!(%date, %total, "day cost");
    total
}

/// Cost of one usage on one day, or `None` when its service is unresolved.
fn usage_cost(date: NaiveDate, usage: &CustomerServiceUsage, discounts: &[Discount]) -> Option<Decimal> {
    let service = usage.service.as_ref()?;

    if !is_chargeable_day(date, service.charges_on_weekends) {
        return Some(Decimal::ZERO);
    }

    let unit_price = usage
        .customer_specific_price_per_day
        .unwrap_or(service.base_price_per_day);
    Some(unit_price * discount_multiplier(date, usage.service_id, discounts))
}

pub fn is_chargeable_day(date: NaiveDate, charges_on_weekends: bool) -> bool {
    charges_on_weekends || !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// `1 - p` for the highest percentage `p` among discounts covering the day;
/// overlapping discounts never stack.
pub fn discount_multiplier(date: NaiveDate, service_id: i64, discounts: &[Discount]) -> Decimal {
    discounts
        .iter()
        .filter(|discount| discount.covers(service_id, date))
        .map(|discount| discount.percentage)
        .max()
        .map_or(Decimal::ONE, |percentage| Decimal::ONE - percentage)
}

/// Drops the `free_days` cheapest days and sums what is left.
pub fn apply_free_days(mut daily_costs: Vec<Decimal>, free_days: u32) -> Decimal {
    daily_costs.sort_unstable();
    let free_days = (free_days as usize).min(daily_costs.len());
    daily_costs.into_iter().skip(free_days).sum()
}
