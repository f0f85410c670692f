use druid::Selector;

use super::animation::AnimationKind;

pub const ANIMATE: Selector<AnimationKind> = Selector::new("fitline.plot.animate");
