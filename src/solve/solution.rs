use crate::BehaviorProfile;
use crate::Field;
use crate::MixedProfile;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile<F> {
    Mixed(MixedProfile<F>),
    Behavior(BehaviorProfile<F>),
}

/// An equilibrium profile with the payoff it yields to each player.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EquilibriumSolution<F> {
    profile: Profile<F>,
    payoffs: Vec<F>,
}

impl<F: Field> EquilibriumSolution<F> {
    pub fn mixed(profile: MixedProfile<F>, payoffs: Vec<F>) -> Self {
        Self {
            profile: Profile::Mixed(profile),
            payoffs,
        }
    }
    pub fn behavior(profile: BehaviorProfile<F>, payoffs: Vec<F>) -> Self {
        Self {
            profile: Profile::Behavior(profile),
            payoffs,
        }
    }
    pub fn profile(&self) -> &Profile<F> {
        &self.profile
    }
    pub fn payoffs(&self) -> &[F] {
        &self.payoffs
    }
    pub fn as_mixed(&self) -> Option<&MixedProfile<F>> {
        match &self.profile {
            Profile::Mixed(profile) => Some(profile),
            Profile::Behavior(_) => None,
        }
    }
    pub fn as_behavior(&self) -> Option<&BehaviorProfile<F>> {
        match &self.profile {
            Profile::Behavior(profile) => Some(profile),
            Profile::Mixed(_) => None,
        }
    }
    pub fn to_f64(&self) -> EquilibriumSolution<f64> {
        EquilibriumSolution {
            profile: match &self.profile {
                Profile::Mixed(profile) => Profile::Mixed(profile.to_f64()),
                Profile::Behavior(profile) => Profile::Behavior(profile.to_f64()),
            },
            payoffs: self.payoffs.iter().map(F::to_f64).collect(),
        }
    }
    /// Same profile up to the field's equality.
    pub fn approx_eq(&self, other: &Self) -> bool {
        match (&self.profile, &other.profile) {
            (Profile::Mixed(a), Profile::Mixed(b)) => a.approx_eq(b),
            (Profile::Behavior(a), Profile::Behavior(b)) => a.approx_eq(b),
            _ => false,
        }
    }
}

/// Drops solutions equal to an earlier one, keeping discovery order.
pub fn distinct<F: Field>(solutions: Vec<EquilibriumSolution<F>>) -> Vec<EquilibriumSolution<F>> {
    let mut kept = Vec::<EquilibriumSolution<F>>::with_capacity(solutions.len());
    for solution in solutions {
        if !kept.iter().any(|k| k.approx_eq(&solution)) {
            kept.push(solution);
        }
    }
    kept
}

impl<F: std::fmt::Display> std::fmt::Display for EquilibriumSolution<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let profile = match &self.profile {
            Profile::Mixed(profile) => profile.to_string(),
            Profile::Behavior(profile) => profile.to_string(),
        };
        let payoffs = self
            .payoffs
            .iter()
            .map(|x| x.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}  payoffs ({})", profile, payoffs)
    }
}
