use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{Bounds, FlowField, PointList, PointSet, Pt2D};

/// The dense series both renderers draw from
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trajectories {
    /// Ground truth, one point per simulation step. Also one point per animation frame.
    pub true_path: Vec<Pt2D>,
    /// Sparser, noisy measurements of the true path
    pub observations: Vec<Pt2D>,
    /// The filter's best estimate, one per filter update
    pub estimates: Vec<Pt2D>,
    /// The particle cloud before resampling, one set per frame
    pub predictions: Vec<PointSet>,
    /// The particle cloud after each resampling event
    pub resamples: Vec<PointSet>,
}

impl Trajectories {
    /// The extent of the three trajectory-like series. Particle clouds are excluded; stray
    /// particles shouldn't zoom the axes out.
    pub fn bounds(&self) -> Bounds {
        let mut b = Bounds::new();
        for pt in self
            .true_path
            .iter()
            .chain(&self.observations)
            .chain(&self.estimates)
        {
            b.update(*pt);
        }
        b
    }
}

/// Everything one plotting call needs, named the way simulation scripts produce it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Scene {
    pub sub_pos: Vec<Pt2D>,
    pub sub_noisy_pos: PointList,
    pub filter_estimates: Vec<Pt2D>,
    #[serde(default)]
    pub filter_predictions: Vec<PointSet>,
    #[serde(default)]
    pub filter_resamplings: Vec<PointSet>,
    pub field: FlowField,
}

impl Scene {
    /// Reads a scene from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs_err::read(path)?;
        let scene: Scene = serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing scene {}", path.display()))?;
        info!(
            "Loaded scene {}: {} path points, {} observations, {} estimates, {}x{} field",
            path.display(),
            scene.sub_pos.len(),
            scene.sub_noisy_pos.len(),
            scene.filter_estimates.len(),
            scene.field.shape().0,
            scene.field.shape().1
        );
        Ok(scene)
    }

    /// Converts caller input into dense series, squeezing wrapped observations.
    pub fn trajectories(&self) -> Result<Trajectories> {
        Ok(Trajectories {
            true_path: self.sub_pos.clone(),
            observations: self.sub_noisy_pos.squeeze()?,
            estimates: self.filter_estimates.clone(),
            predictions: self.filter_predictions.clone(),
            resamples: self.filter_resamplings.clone(),
        })
    }
}
