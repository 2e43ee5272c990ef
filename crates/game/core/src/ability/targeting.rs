//! Targeting contract and the intent-driven resolver.
//!
//! The manager starts a targeting session and later polls for its outcome.
//! How raw input becomes a [`TargetingResult`] is up to the implementation;
//! [`IntentTargeting`] resolves abstract intents (clicks, drags, confirm,
//! cancel) and is what the runtime uses.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use super::{Ability, TargetingType};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{UnitId, Vec3};

/// What a targeting session resolved to. Consumed exactly once.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetingResult {
    SingleTarget(UnitId),
    /// Ordered, without duplicates.
    MultipleTargets(Vec<UnitId>),
    Point(Vec3),
}

impl TargetingResult {
    /// Units named by the result, in order.
    pub fn units(&self) -> &[UnitId] {
        match self {
            Self::SingleTarget(id) => std::slice::from_ref(id),
            Self::MultipleTargets(ids) => ids,
            Self::Point(_) => &[],
        }
    }
}

/// Outcome of a targeting session.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetingNotification {
    Confirmed(TargetingResult),
    Cancelled,
}

/// Resolves player intent into a [`TargetingResult`].
///
/// At most one session is active at a time. Outcomes are queued and handed to
/// the manager through [`AbilityTargeting::poll_notification`] on its next
/// update. A session cancelled through [`AbilityTargeting::cancel_targeting`]
/// ends silently, since the caller already knows.
pub trait AbilityTargeting: Send {
    fn start_targeting(&mut self, ability: &Ability, caster: UnitId);

    fn cancel_targeting(&mut self);

    fn is_targeting(&self) -> bool;

    fn poll_notification(&mut self) -> Option<TargetingNotification>;
}

/// Rejected targeting intent. The session is left as it was.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetingError {
    #[error("No targeting session is active")]
    NotTargeting,

    #[error("Nothing is selected")]
    NothingSelected,
}

impl GameError for TargetingError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotTargeting => ErrorSeverity::Validation,
            Self::NothingSelected => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::NotTargeting => "TARGETING_NOT_ACTIVE",
            Self::NothingSelected => "TARGETING_NOTHING_SELECTED",
        }
    }
}

/// Abstract player input during targeting.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TargetingIntent {
    ClickUnit(UnitId),
    ClickPoint(Vec3),
    DragSelect(Vec<UnitId>),
    Confirm,
    Cancel,
}

#[derive(Clone, Debug, PartialEq)]
struct TargetingSession {
    targeting_type: TargetingType,
    caster: UnitId,
    selection: Vec<UnitId>,
    point: Option<Vec3>,
}

impl TargetingSession {
    fn select(&mut self, id: UnitId) {
        if !self.selection.contains(&id) {
            self.selection.push(id);
        }
    }
}

/// Intent-driven [`AbilityTargeting`].
///
/// - `PointAndClick` confirms on the first unit or point clicked.
/// - `Cone` and `RangedAOE` accumulate a selection from clicks and drags and
///   confirm it on [`TargetingIntent::Confirm`]. A chosen point is used only
///   when no unit was selected.
#[derive(Clone, Debug, Default)]
pub struct IntentTargeting {
    session: Option<TargetingSession>,
    outbox: VecDeque<TargetingNotification>,
}

impl IntentTargeting {
    pub fn new() -> Self {
        Self::default()
    }

    /// Caster of the active session.
    pub fn caster(&self) -> Option<UnitId> {
        self.session.as_ref().map(|session| session.caster)
    }

    /// Units selected so far in the active session.
    pub fn selection(&self) -> &[UnitId] {
        self.session
            .as_ref()
            .map(|session| session.selection.as_slice())
            .unwrap_or_default()
    }

    pub fn submit(&mut self, intent: TargetingIntent) -> Result<(), TargetingError> {
        let session = self.session.as_mut().ok_or(TargetingError::NotTargeting)?;

        let resolved = match intent {
            TargetingIntent::Cancel => {
                self.session = None;
                self.outbox.push_back(TargetingNotification::Cancelled);
                return Ok(());
            }
            TargetingIntent::ClickUnit(id) if !session.targeting_type.is_area() => {
                Some(TargetingResult::SingleTarget(id))
            }
            TargetingIntent::ClickPoint(point) if !session.targeting_type.is_area() => {
                Some(TargetingResult::Point(point))
            }
            TargetingIntent::DragSelect(ids) if !session.targeting_type.is_area() => {
                let first = ids.first().copied().ok_or(TargetingError::NothingSelected)?;
                Some(TargetingResult::SingleTarget(first))
            }
            TargetingIntent::ClickUnit(id) => {
                session.select(id);
                None
            }
            TargetingIntent::ClickPoint(point) => {
                session.point = Some(point);
                None
            }
            TargetingIntent::DragSelect(ids) => {
                ids.into_iter().for_each(|id| session.select(id));
                None
            }
            TargetingIntent::Confirm => {
                if !session.selection.is_empty() {
                    Some(TargetingResult::MultipleTargets(session.selection.clone()))
                } else if let Some(point) = session.point {
                    Some(TargetingResult::Point(point))
                } else {
                    return Err(TargetingError::NothingSelected);
                }
            }
        };

        if let Some(result) = resolved {
            self.session = None;
            self.outbox.push_back(TargetingNotification::Confirmed(result));
        }
        Ok(())
    }
}

/// Lets the host keep a handle for feeding input while the manager owns the
/// targeting subsystem.
impl<T: AbilityTargeting> AbilityTargeting for Arc<Mutex<T>> {
    fn start_targeting(&mut self, ability: &Ability, caster: UnitId) {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .start_targeting(ability, caster);
    }

    fn cancel_targeting(&mut self) {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .cancel_targeting();
    }

    fn is_targeting(&self) -> bool {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_targeting()
    }

    fn poll_notification(&mut self) -> Option<TargetingNotification> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .poll_notification()
    }
}

impl AbilityTargeting for IntentTargeting {
    fn start_targeting(&mut self, ability: &Ability, caster: UnitId) {
        self.outbox.clear();
        self.session = Some(TargetingSession {
            targeting_type: ability.targeting_type,
            caster,
            selection: Vec::new(),
            point: None,
        });
    }

    fn cancel_targeting(&mut self) {
        self.session = None;
        self.outbox.clear();
    }

    fn is_targeting(&self) -> bool {
        self.session.is_some()
    }

    fn poll_notification(&mut self) -> Option<TargetingNotification> {
        self.outbox.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(targeting_type: TargetingType) -> IntentTargeting {
        let mut targeting = IntentTargeting::new();
        targeting.start_targeting(&Ability::new("Test", targeting_type), UnitId::PLAYER);
        targeting
    }

    #[test]
    fn intents_without_session_are_rejected() {
        let mut targeting = IntentTargeting::new();
        assert_eq!(
            targeting.submit(TargetingIntent::Confirm),
            Err(TargetingError::NotTargeting)
        );
    }

    #[test]
    fn point_and_click_confirms_on_click() {
        let mut targeting = start(TargetingType::PointAndClick);

        targeting.submit(TargetingIntent::ClickUnit(UnitId(3))).unwrap();

        assert!(!targeting.is_targeting());
        assert_eq!(
            targeting.poll_notification(),
            Some(TargetingNotification::Confirmed(
                TargetingResult::SingleTarget(UnitId(3))
            ))
        );
        assert_eq!(targeting.poll_notification(), None);
    }

    #[test]
    fn area_accumulates_deduplicated_selection() {
        let mut targeting = start(TargetingType::Cone);

        targeting.submit(TargetingIntent::ClickUnit(UnitId(2))).unwrap();
        targeting
            .submit(TargetingIntent::DragSelect(vec![UnitId(1), UnitId(2), UnitId(4)]))
            .unwrap();
        assert!(targeting.is_targeting());
        assert_eq!(targeting.selection(), &[UnitId(2), UnitId(1), UnitId(4)]);

        targeting.submit(TargetingIntent::Confirm).unwrap();

        assert_eq!(
            targeting.poll_notification(),
            Some(TargetingNotification::Confirmed(
                TargetingResult::MultipleTargets(vec![UnitId(2), UnitId(1), UnitId(4)])
            ))
        );
    }

    #[test]
    fn area_with_only_a_point_confirms_point() {
        let mut targeting = start(TargetingType::RangedAOE);
        let point = Vec3::new(1.0, 0.0, 2.0);

        targeting.submit(TargetingIntent::ClickPoint(point)).unwrap();
        targeting.submit(TargetingIntent::Confirm).unwrap();

        assert_eq!(
            targeting.poll_notification(),
            Some(TargetingNotification::Confirmed(TargetingResult::Point(point)))
        );
    }

    #[test]
    fn empty_confirm_keeps_session_open() {
        let mut targeting = start(TargetingType::Cone);

        assert_eq!(
            targeting.submit(TargetingIntent::Confirm),
            Err(TargetingError::NothingSelected)
        );
        assert!(targeting.is_targeting());
        assert_eq!(targeting.poll_notification(), None);
    }

    #[test]
    fn cancel_intent_notifies_but_cancel_call_is_silent() {
        let mut targeting = start(TargetingType::Cone);
        targeting.submit(TargetingIntent::Cancel).unwrap();
        assert_eq!(
            targeting.poll_notification(),
            Some(TargetingNotification::Cancelled)
        );

        let mut targeting = start(TargetingType::Cone);
        targeting.cancel_targeting();
        assert!(!targeting.is_targeting());
        assert_eq!(targeting.poll_notification(), None);
    }
}
