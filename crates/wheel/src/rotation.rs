use derive_more::{AsRef, Deref, Display, From, Into};
use serde::Serialize;
use serde_with::DeserializeFromStr;
use std::time::Duration;
use strum::{Display as StrumDisplay, EnumIter, EnumString};

/// Handle to a group inside a [`RotationSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From, Into)]
pub struct GroupId(usize);

impl GroupId {
    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Deref, From, Into, AsRef)]
pub struct GroupName(String);

impl GroupName {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

/// Number of evenly spaced resting orientations of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Deref)]
pub struct Steps(u32);

impl Steps {
    pub const NOTES: Self = Self(12);
    pub const QUARTERS: Self = Self(4);

    pub fn new(count: u32) -> Option<Self> {
        (count > 0).then_some(Self(count))
    }

    /// Angle between neighbouring resting orientations, in degrees.
    pub fn unit(&self) -> f64 {
        360.0 / self.0 as f64
    }

    /// Nearest resting orientation to `degrees`. Works on unbounded angles;
    /// ties round half away from zero.
    pub fn snap(&self, degrees: f64) -> f64 {
        (self.0 as f64 * degrees / 360.0).round() * self.unit()
    }
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    #[default]
    EaseOut,
    EaseIn,
    EaseInOut,
    /// Overshoots slightly before settling.
    Back,
}

impl Easing {
    /// Maps linear progress in `[0, 1]` to eased progress.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::EaseIn => t * t * t,
            Self::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
            Self::Back => {
                let c1 = 1.70158;
                let c3 = c1 + 1.0;
                let u = t - 1.0;
                1.0 + c3 * u * u * u + c1 * u * u
            }
        }
    }
}

pub const MIN_SNAP_DURATION: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSettings {
    pub duration: Duration,
    pub easing: Easing,
}

impl AnimationSettings {
    /// Snapping is never instantaneous, durations are raised to at least one
    /// frame.
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            duration: duration.max(MIN_SNAP_DURATION),
            easing,
        }
    }
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self::new(Duration::from_millis(400), Easing::EaseOut)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapAnimation {
    pub from: f64,
    pub to: f64,
    elapsed: Duration,
    settings: AnimationSettings,
}

impl SnapAnimation {
    pub fn new(from: f64, to: f64, settings: AnimationSettings) -> Self {
        Self {
            from,
            to,
            elapsed: Duration::ZERO,
            settings,
        }
    }

    pub fn progress(&self) -> f64 {
        (self.elapsed.as_secs_f64() / self.settings.duration.as_secs_f64()).min(1.0)
    }

    pub fn value(&self) -> f64 {
        self.from + (self.to - self.from) * self.settings.easing.apply(self.progress())
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.settings.duration
    }

    fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }
}

/// Capabilities the interaction engine needs from whatever draws the groups.
///
/// `set_rotation` is the live, immediate path used while dragging;
/// `animate_rotation_to` starts an eased transition and returns at once.
pub trait RotationSurface {
    fn create_group(&mut self, name: &str) -> GroupId;
    /// Current angle in degrees. Unbounded, may exceed a full turn.
    fn rotation(&self, group: GroupId) -> f64;
    fn set_rotation(&mut self, group: GroupId, degrees: f64);
    fn animate_rotation_to(&mut self, group: GroupId, degrees: f64);
}

#[derive(Debug, Clone)]
pub struct RotationGroup {
    pub name: GroupName,
    angle: f64,
    animation: Option<SnapAnimation>,
}

impl RotationGroup {
    fn new(name: GroupName) -> Self {
        Self {
            name,
            angle: 0.0,
            animation: None,
        }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn animation(&self) -> Option<&SnapAnimation> {
        self.animation.as_ref()
    }

    fn tick(&mut self, dt: Duration) {
        if let Some(anim) = &mut self.animation {
            anim.advance(dt);
            if anim.is_finished() {
                self.angle = anim.to;
                self.animation = None;
            } else {
                self.angle = anim.value();
            }
        }
    }
}

/// Flat, index addressed store of rotation groups. Groups live as long as
/// the store; ids are never reused.
#[derive(Debug, Clone, Default)]
pub struct Groups {
    groups: Vec<RotationGroup>,
    settings: AnimationSettings,
}

impl Groups {
    pub fn new(settings: AnimationSettings) -> Self {
        Self {
            groups: Vec::new(),
            settings,
        }
    }

    pub fn set_animation_settings(&mut self, settings: AnimationSettings) {
        self.settings = settings;
    }

    pub fn animation_settings(&self) -> AnimationSettings {
        self.settings
    }

    pub fn get(&self, id: GroupId) -> Option<&RotationGroup> {
        self.groups.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (GroupId, &RotationGroup)> {
        self.groups.iter().enumerate().map(|(i, g)| (GroupId(i), g))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn is_animating(&self) -> bool {
        self.groups.iter().any(|g| g.animation.is_some())
    }

    /// Advances every running snap animation. Returns whether any is still
    /// running afterwards.
    pub fn tick(&mut self, dt: Duration) -> bool {
        self.groups.iter_mut().for_each(|g| g.tick(dt));
        self.is_animating()
    }

    fn get_mut(&mut self, id: GroupId) -> Option<&mut RotationGroup> {
        let group = self.groups.get_mut(id.0);
        if group.is_none() {
            log::warn!("Unknown rotation group {}", id);
        }
        group
    }
}

impl RotationSurface for Groups {
    fn create_group(&mut self, name: &str) -> GroupId {
        self.groups.push(RotationGroup::new(GroupName::new(name)));
        GroupId(self.groups.len() - 1)
    }

    fn rotation(&self, group: GroupId) -> f64 {
        self.get(group).map(RotationGroup::angle).unwrap_or_default()
    }

    fn set_rotation(&mut self, group: GroupId, degrees: f64) {
        if let Some(g) = self.get_mut(group) {
            // direct manipulation takes over from a running snap
            g.animation = None;
            g.angle = degrees;
        }
    }

    fn animate_rotation_to(&mut self, group: GroupId, degrees: f64) {
        let settings = self.settings;
        if let Some(g) = self.get_mut(group) {
            g.animation = Some(SnapAnimation::new(g.angle, degrees, settings));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snap_to_twelve_steps() {
        assert_eq!(Steps::NOTES.snap(37.0), 30.0);
        assert_eq!(Steps::NOTES.snap(-37.0), -30.0);
        assert_eq!(Steps::NOTES.snap(89.0), 90.0);
        assert_eq!(Steps::NOTES.snap(725.0), 720.0);
    }

    #[test]
    fn test_snap_ties_round_away_from_zero() {
        for _ in 0..3 {
            assert_eq!(Steps::NOTES.snap(15.0), 30.0);
            assert_eq!(Steps::NOTES.snap(-15.0), -30.0);
        }
        assert_eq!(Steps::QUARTERS.snap(45.0), 90.0);
    }

    #[test]
    fn test_snap_to_four_steps() {
        assert_eq!(Steps::QUARTERS.snap(100.0), 90.0);
        assert_eq!(Steps::QUARTERS.snap(-170.0), -180.0);
        assert_eq!(Steps::QUARTERS.unit(), 90.0);
    }

    #[test]
    fn test_zero_steps_rejected() {
        assert_eq!(Steps::new(0), None);
        assert_eq!(Steps::new(12), Some(Steps::NOTES));
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in <Easing as strum::IntoEnumIterator>::iter() {
            assert!(easing.apply(0.0).abs() < 1e-12, "{easing}");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-12, "{easing}");
        }
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
        assert!(Easing::EaseIn.apply(0.5) < 0.5);
    }

    #[test]
    fn test_easing_deserialization() {
        let cases = vec![
            ("\"linear\"", Easing::Linear),
            ("\"ease-out\"", Easing::EaseOut),
            ("\"EASE-IN-OUT\"", Easing::EaseInOut),
            ("\"back\"", Easing::Back),
        ];

        for (json, expected) in cases {
            let deserialized: Easing = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_animation_is_never_instant() {
        let settings = AnimationSettings::new(Duration::ZERO, Easing::Linear);
        assert_eq!(settings.duration, MIN_SNAP_DURATION);
    }

    #[test]
    fn test_groups_animate_to_target() {
        let mut groups = Groups::new(AnimationSettings::new(
            Duration::from_millis(100),
            Easing::Linear,
        ));
        let id = groups.create_group("outer");
        groups.set_rotation(id, 37.0);
        groups.animate_rotation_to(id, 30.0);

        assert_eq!(groups.rotation(id), 37.0);
        assert!(groups.tick(Duration::from_millis(50)));
        assert!((groups.rotation(id) - 33.5).abs() < 1e-9);

        assert!(!groups.tick(Duration::from_millis(60)));
        assert_eq!(groups.rotation(id), 30.0);
        assert!(!groups.is_animating());
    }

    #[test]
    fn test_set_rotation_interrupts_animation() {
        let mut groups = Groups::default();
        let id = groups.create_group("inner");
        groups.animate_rotation_to(id, 90.0);
        groups.tick(Duration::from_millis(10));

        groups.set_rotation(id, 12.0);
        assert!(!groups.is_animating());
        groups.tick(Duration::from_secs(1));
        assert_eq!(groups.rotation(id), 12.0);
    }

    #[test]
    fn test_unknown_group_is_ignored() {
        let mut groups = Groups::default();
        let stray = GroupId::from(3);
        groups.set_rotation(stray, 10.0);
        groups.animate_rotation_to(stray, 10.0);
        assert_eq!(groups.rotation(stray), 0.0);
        assert!(groups.is_empty());
    }
}
