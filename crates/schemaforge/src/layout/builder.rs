//! Whole-scene retry wrapper.
//!
//! An unlucky sequence of placements can paint a scene into a corner where
//! the next element has no legal position left. The builder discards such a
//! scene entirely and starts again from an empty canvas, up to a fixed number
//! of times.

use log::{debug, info};
use rand::Rng;

use super::{Infeasible, LayoutError, Scene, SceneAssembler};
use crate::config::AppConfig;

/// Builds complete scenes, retrying whole-scene assembly on infeasibility.
pub struct SceneBuilder<'a> {
    assembler: SceneAssembler<'a>,
    max_scenes: usize,
}

impl<'a> SceneBuilder<'a> {
    pub fn new(config: &'a AppConfig) -> Self {
        Self {
            assembler: SceneAssembler::new(config),
            max_scenes: config.placement().scene_retries(),
        }
    }

    /// Builds one scene, restarting from scratch after every failed assembly.
    ///
    /// The random stream keeps advancing across retries, so the outcome is
    /// fully determined by the generator state on entry.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::SceneInfeasible`] carrying the last placement
    /// failure once `scene_retries` assemblies have failed.
    pub fn build<R: Rng>(&self, rng: &mut R) -> Result<Scene, LayoutError> {
        let mut last = None;

        for attempt in 1..=self.max_scenes {
            match self.assembler.assemble(rng) {
                Ok(scene) => {
                    if attempt > 1 {
                        info!(attempt; "Scene placed after retries");
                    }
                    return Ok(scene);
                }
                Err(err) => {
                    debug!(attempt, cause:% = err; "Scene placement failed, restarting");
                    last = Some(err);
                }
            }
        }

        Err(LayoutError::SceneInfeasible {
            attempts: self.max_scenes,
            last: last.unwrap_or_else(|| Infeasible::new("scene", 0)),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use rand::{SeedableRng, rngs::StdRng};

    use schemaforge_core::geometry::overlaps;

    use super::*;
    use crate::config::PlacementConfig;

    #[test]
    fn test_default_config_builds() {
        let config = AppConfig::default();
        let builder = SceneBuilder::new(&config);
        let mut rng = StdRng::seed_from_u64(config.seed());

        let scene = builder.build(&mut rng).expect("default scene builds");
        assert_eq!(scene.components().len(), 11);

        let components = scene.components();
        for (i, a) in components.iter().enumerate() {
            for b in &components[i + 1..] {
                assert!(
                    !overlaps(a.bbox(), b.bbox(), config.placement().tolerance()),
                    "{} overlaps {}",
                    a.cid(),
                    b.cid()
                );
            }
        }
    }

    #[test]
    fn test_over_constrained_config_exhausts_retries() {
        // Padding this large leaves room for at most a couple of elements.
        let placement = PlacementConfig::default()
            .with_padding(5.0)
            .with_max_attempts(40)
            .with_scene_retries(3);
        let config = AppConfig::default().with_placement(placement);
        let builder = SceneBuilder::new(&config);
        let mut rng = StdRng::seed_from_u64(0);

        let err = builder.build(&mut rng).unwrap_err();
        let LayoutError::SceneInfeasible { attempts, last } = &err;
        assert_eq!(*attempts, 3);
        assert_eq!(last.attempts(), 40);
        assert!(err.source().is_some(), "last cause is attached");
    }

    #[test]
    fn test_same_seed_same_scene() {
        let config = AppConfig::default();
        let builder = SceneBuilder::new(&config);

        let mut a = StdRng::seed_from_u64(123);
        let mut b = StdRng::seed_from_u64(123);
        let scene_a = builder.build(&mut a).unwrap();
        let scene_b = builder.build(&mut b).unwrap();

        assert_eq!(scene_a.components(), scene_b.components());
        assert_eq!(scene_a.markers(), scene_b.markers());
        assert_eq!(scene_a.primitives(), scene_b.primitives());
    }
}
