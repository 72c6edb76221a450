/// Where a stagger starts counting from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaggerFrom {
    /// First target first.
    #[default]
    Start,
    /// Middle target first, spreading outwards. For an even count the left element of the
    /// middle pair goes first.
    Center,
    /// Last target first.
    End,
}

/// Fixed per-target delay applied across a batch of otherwise identical tweens.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Stagger {
    /// Delay between consecutive ranks.
    pub each: f64,
    #[serde(default)]
    pub from: StaggerFrom,
}

impl Stagger {
    pub fn new(each: f64) -> Self {
        Self {
            each,
            from: StaggerFrom::Start,
        }
    }

    pub fn from_center(each: f64) -> Self {
        Self {
            each,
            from: StaggerFrom::Center,
        }
    }

    /// Integer rank of target `index` out of `count`.
    pub fn rank(&self, index: usize, count: usize) -> usize {
        if count == 0 {
            return 0;
        }
        let index = index.min(count - 1);
        match self.from {
            StaggerFrom::Start => index,
            StaggerFrom::End => count - 1 - index,
            StaggerFrom::Center => {
                let mid = (count - 1) / 2;
                mid.abs_diff(index)
            }
        }
    }

    /// Delay of target `index` relative to the batch start.
    pub fn offset(&self, index: usize, count: usize) -> f64 {
        self.each * self.rank(index, count) as f64
    }

    /// Largest delay in a batch of `count` targets.
    pub fn span(&self, count: usize) -> f64 {
        (0..count)
            .map(|i| self.offset(i, count))
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/stagger.rs"]
mod tests;
