//! Type matchup queries for the resolver and for scoring layers

use crate::types::Type;

/// Check if the defender takes zero damage from an attacking type
pub fn is_immune_to(defender_types: &[Type], attacking_type: Type) -> bool {
    attacking_type.effectiveness_multi(defender_types) == 0.0
}

/// Check if the defender takes more than neutral damage from any of the given types
pub fn is_weak_to_any(defender_types: &[Type], attacking_types: &[Type]) -> bool {
    attacking_types
        .iter()
        .any(|t| t.effectiveness_multi(defender_types) > 1.0)
}

/// All types that hit the defender super-effectively
pub fn weaknesses(defender_types: &[Type]) -> Vec<Type> {
    Type::all()
        .iter()
        .copied()
        .filter(|t| t.effectiveness_multi(defender_types) > 1.0)
        .collect()
}

/// All types the defender resists (0 < effectiveness < 1)
pub fn resistances(defender_types: &[Type]) -> Vec<Type> {
    Type::all()
        .iter()
        .copied()
        .filter(|t| {
            let eff = t.effectiveness_multi(defender_types);
            eff > 0.0 && eff < 1.0
        })
        .collect()
}
