//! Occupation of a working-age adult.

use sir_core::{AgentRng, GlobalCount, WorkClass, Weekday};

/// Days on which every worker is expected at work.
pub const WORK_DAYS: [Weekday; 6] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
    Weekday::Saturday,
];

#[derive(Clone, Debug, PartialEq)]
pub struct WorkInfo {
    pub work_class: WorkClass,
    pub can_work_from_home: bool,
    pub meet_non_coworkers_at_work: bool,
    pub essential_worker: bool,
    pub fixed_work_location: bool,
    pub house_bound_worker: bool,
    pub base_income: f64,
    /// Fraction of `base_income` lost on days spent isolated.
    pub income_loss_isolated: f64,
    /// Recomputed every working morning.
    pub isolated: bool,
}

impl WorkInfo {
    /// Pick a class by linear ranking (weight `i/5` for the `i`-th class) and
    /// count the new worker in `work_population`.
    pub fn assign(rng: &mut AgentRng, counters: &mut GlobalCount) -> Self {
        let n = WorkClass::ALL.len() as f64;
        let weights: Vec<f64> = (1..=WorkClass::ALL.len()).map(|i| i as f64 / n).collect();
        let class = rng
            .choose_weighted(&WorkClass::ALL, &weights)
            .copied()
            .unwrap_or(WorkClass::Essential);
        counters.work_population += 1;
        Self::for_class(class)
    }

    /// Income and capabilities for `class`.
    pub fn for_class(class: WorkClass) -> Self {
        let (base_income, income_loss_isolated) = match class {
            WorkClass::Office | WorkClass::Housebound => (1.0, 0.0),
            WorkClass::Factory | WorkClass::Retail | WorkClass::Essential => (1.0, 1.0),
        };
        Self {
            work_class: class,
            can_work_from_home: matches!(class, WorkClass::Office | WorkClass::Housebound),
            meet_non_coworkers_at_work: matches!(class, WorkClass::Retail | WorkClass::Essential),
            essential_worker: class == WorkClass::Essential,
            fixed_work_location: true,
            house_bound_worker: class == WorkClass::Housebound,
            base_income,
            income_loss_isolated,
            isolated: false,
        }
    }

    pub fn current_income(&self) -> f64 {
        if self.isolated {
            self.base_income * (1.0 - self.income_loss_isolated)
        } else {
            self.base_income
        }
    }

    #[inline]
    pub fn is_working_day(&self, weekday: Weekday) -> bool {
        WORK_DAYS.contains(&weekday)
    }
}
