//! Effect chain execution.
//!
//! ## Execution Flow
//! 1. Create one [`AbilityExecutionContext`] for the whole execution
//! 2. For each resolved target (a single pass with no target for points):
//!    - Point the context at the target and rewind the multiplier
//!    - Run every effect in declared order against the shared context
//! 3. Return the accumulated [`ExecutionReport`]
//!
//! Missing, dead or despawned targets are skipped silently. Rounding is left
//! to [`crate::Unit`].

use super::Ability;
use super::context::AbilityExecutionContext;
use super::effect::{AbilityEffect, AppliedEffect, EffectKind};
use super::targeting::TargetingResult;
use crate::env::{NarrationSink, StatModifierPipeline, messages};
use crate::state::{Roster, UnitId};

/// Result of running an ability's effect chain.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionReport {
    pub ability: String,
    pub enemy_was_hit: bool,
    pub applied: Vec<AppliedEffect>,
}

impl From<AbilityExecutionContext> for ExecutionReport {
    fn from(ctx: AbilityExecutionContext) -> Self {
        Self {
            ability: ctx.ability_name,
            enemy_was_hit: ctx.enemy_was_hit,
            applied: ctx.applied,
        }
    }
}

/// Runs `ability` from `caster` against `targets`.
pub fn execute_ability(
    ability: &Ability,
    caster: UnitId,
    targets: &TargetingResult,
    roster: &mut Roster,
    stats: Option<&dyn StatModifierPipeline>,
    narration: &dyn NarrationSink,
) -> ExecutionReport {
    let mut ctx = AbilityExecutionContext::new(caster, &ability.name);

    let passes: Vec<Option<UnitId>> = match targets {
        TargetingResult::SingleTarget(id) => vec![Some(*id)],
        TargetingResult::MultipleTargets(ids) => ids.iter().copied().map(Some).collect(),
        TargetingResult::Point(_) => vec![None],
    };

    for target in passes {
        ctx.begin_target(target);
        for effect in &ability.effects {
            apply_effect(effect, &mut ctx, roster, stats, narration);
        }
    }

    ctx.into()
}

fn apply_effect(
    effect: &AbilityEffect,
    ctx: &mut AbilityExecutionContext,
    roster: &mut Roster,
    stats: Option<&dyn StatModifierPipeline>,
    narration: &dyn NarrationSink,
) {
    if let EffectKind::Amplify { factor } = effect.kind {
        ctx.accumulated_multiplier *= factor;
        ctx.applied.push(AppliedEffect {
            target: ctx.caster,
            kind: effect.kind,
            magnitude: factor,
            applied: ctx.accumulated_multiplier,
        });
        return;
    }

    let Some(target) = ctx.resolve_target(effect.target_self) else {
        return;
    };
    if !roster.is_targetable(target) {
        return;
    }
    let Some((unit, events)) = roster.unit_with_events(target) else {
        return;
    };
    let on_caster = target == ctx.caster;

    let (magnitude, applied) = match effect.kind {
        EffectKind::Damage { amount } => {
            let magnitude = ctx.scale(stats.map_or(amount, |s| s.apply_damage(amount)));
            let report = unit.take_damage(magnitude, events);
            if report.dealt > 0.0 {
                if !on_caster {
                    ctx.enemy_was_hit = true;
                }
                narration.narrate(messages::cast_damage(
                    &ctx.ability_name,
                    report.dealt,
                    unit.name(),
                ));
            }
            (magnitude, report.dealt)
        }
        EffectKind::Heal { amount } => {
            let magnitude = ctx.scale(stats.map_or(amount, |s| s.apply_heal(amount)));
            let healed = unit.heal(magnitude, events);
            if healed > 0.0 {
                let line = if on_caster {
                    messages::self_heal(&ctx.ability_name, healed)
                } else {
                    messages::cast_heal(&ctx.ability_name, unit.name(), healed)
                };
                narration.narrate(line);
            }
            (magnitude, healed)
        }
        EffectKind::Block { amount } => {
            let magnitude = ctx.scale(stats.map_or(amount, |s| s.apply_block(amount)));
            let gained = unit.add_block(magnitude, events);
            if gained > 0.0 && on_caster {
                narration.narrate(messages::gained_block(&ctx.ability_name, gained));
            }
            (magnitude, gained)
        }
        EffectKind::Amplify { .. } => return,
    };

    if applied > 0.0 {
        ctx.applied.push(AppliedEffect {
            target,
            kind: effect.kind,
            magnitude,
            applied,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::TargetingType;
    use crate::config::{CombatConfig, PlayerDefaults};
    use crate::env::{FixedRoll, MessageQueue};
    use crate::event::CombatEvent;
    use crate::state::{Player, Vec3};
    use crate::stats::{Bonus, ModifierTable, StatKey};

    fn create_test_roster() -> Roster {
        let mut roster = Roster::new(Player::new(
            CombatConfig::default(),
            None,
            Box::new(FixedRoll::ALWAYS_HIT),
        ));
        roster.player.enter_combat(&mut roster.events);
        roster
    }

    fn run(ability: &Ability, targets: TargetingResult, roster: &mut Roster) -> ExecutionReport {
        let narration = MessageQueue::new();
        execute_ability(ability, UnitId::PLAYER, &targets, roster, None, &narration)
    }

    #[test]
    fn damage_lands_on_single_target_and_narrates() {
        let mut roster = create_test_roster();
        let goblin = roster.spawn_enemy("Goblin", 30.0);
        let ability = Ability::new("Firebolt", TargetingType::PointAndClick)
            .with_effect(AbilityEffect::damage(10.0));
        let narration = MessageQueue::new();

        let report = execute_ability(
            &ability,
            UnitId::PLAYER,
            &TargetingResult::SingleTarget(goblin),
            &mut roster,
            None,
            &narration,
        );

        assert!(report.enemy_was_hit);
        assert_eq!(roster.unit(goblin).unwrap().current_health(), 20.0);
        assert_eq!(
            narration.drain(),
            vec!["You cast Firebolt for 10 damage to Goblin.".to_string()]
        );
    }

    #[test]
    fn amplify_scales_later_effects_only() {
        let mut roster = create_test_roster();
        let goblin = roster.spawn_enemy("Goblin", 100.0);
        let ability = Ability::new("Overcharge", TargetingType::PointAndClick)
            .with_effect(AbilityEffect::damage(5.0))
            .with_effect(AbilityEffect::amplify(2.0))
            .with_effect(AbilityEffect::damage(5.0));

        run(&ability, TargetingResult::SingleTarget(goblin), &mut roster);

        // 5 + 5 × 2
        assert_eq!(roster.unit(goblin).unwrap().current_health(), 85.0);
    }

    #[test]
    fn multiplier_does_not_compound_across_targets() {
        let mut roster = create_test_roster();
        let a = roster.spawn_enemy("A", 100.0);
        let b = roster.spawn_enemy("B", 100.0);
        let ability = Ability::new("Chain", TargetingType::Cone)
            .with_effect(AbilityEffect::amplify(2.0))
            .with_effect(AbilityEffect::damage(5.0));

        run(&ability, TargetingResult::MultipleTargets(vec![a, b]), &mut roster);

        assert_eq!(roster.unit(a).unwrap().current_health(), 90.0);
        assert_eq!(roster.unit(b).unwrap().current_health(), 90.0);
    }

    #[test]
    fn point_target_runs_only_self_effects() {
        let mut roster = create_test_roster();
        let goblin = roster.spawn_enemy("Goblin", 20.0);
        let ability = Ability::new("Ward", TargetingType::RangedAOE)
            .with_effect(AbilityEffect::damage(10.0))
            .with_effect(AbilityEffect::block(4.0).on_self());

        let report = run(&ability, TargetingResult::Point(Vec3::ZERO), &mut roster);

        assert!(!report.enemy_was_hit);
        assert_eq!(roster.unit(goblin).unwrap().current_health(), 20.0);
        assert_eq!(roster.player.unit().current_block(), 4.0);
    }

    #[test]
    fn dead_and_missing_targets_are_skipped() {
        let mut roster = create_test_roster();
        let goblin = roster.spawn_enemy("Goblin", 5.0);
        let ability = Ability::new("Smite", TargetingType::Cone)
            .with_effect(AbilityEffect::damage(10.0));

        run(
            &ability,
            TargetingResult::MultipleTargets(vec![goblin, goblin, UnitId(99)]),
            &mut roster,
        );

        assert_eq!(roster.events.count(|e| matches!(e, CombatEvent::Died { .. })), 1);
    }

    #[test]
    fn stat_pipeline_adjusts_base_before_multiplier() {
        let mut roster = create_test_roster();
        let goblin = roster.spawn_enemy("Goblin", 100.0);
        let table = ModifierTable::new(PlayerDefaults::default());
        table.add(StatKey::Damage, Bonus::flat(2.0));
        let ability = Ability::new("Strike", TargetingType::PointAndClick)
            .with_effect(AbilityEffect::amplify(1.5))
            .with_effect(AbilityEffect::damage(3.0));
        let narration = MessageQueue::new();

        execute_ability(
            &ability,
            UnitId::PLAYER,
            &TargetingResult::SingleTarget(goblin),
            &mut roster,
            Some(&table),
            &narration,
        );

        // (3 + 2) × 1.5 = 7.5, rounded up
        assert_eq!(roster.unit(goblin).unwrap().current_health(), 92.0);
    }

    #[test]
    fn self_heal_uses_self_message() {
        let mut roster = create_test_roster();
        let goblin = roster.spawn_enemy("Goblin", 20.0);
        {
            let (unit, events) = roster.unit_with_events(UnitId::PLAYER).unwrap();
            unit.take_damage(30.0, events);
        }
        let ability = Ability::new("Drain", TargetingType::PointAndClick)
            .with_effect(AbilityEffect::damage(4.0))
            .with_effect(AbilityEffect::heal(4.0).on_self());
        let narration = MessageQueue::new();

        execute_ability(
            &ability,
            UnitId::PLAYER,
            &TargetingResult::SingleTarget(goblin),
            &mut roster,
            None,
            &narration,
        );

        assert_eq!(roster.player.unit().current_health(), 74.0);
        assert_eq!(
            narration.drain(),
            vec![
                "You cast Drain for 4 damage to Goblin.".to_string(),
                "You healed yourself for 4 with Drain.".to_string(),
            ]
        );
    }
}
