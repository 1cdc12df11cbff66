use std::path::PathBuf;

/// Model files inside a DNAscope long-read model bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelBundle {
    root: PathBuf,
}

impl ModelBundle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn diploid(&self) -> PathBuf {
        self.root.join("diploid_model")
    }

    pub fn diploid_unphased(&self) -> PathBuf {
        self.root.join("diploid_model_unphased")
    }

    pub fn diploid_hp(&self) -> PathBuf {
        self.root.join("diploid_hp_model")
    }

    pub fn haploid(&self) -> PathBuf {
        self.root.join("haploid_model")
    }

    pub fn haploid_hp(&self) -> PathBuf {
        self.root.join("haploid_hp_model")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_paths() {
        let bundle = ModelBundle::new("/models/HiFi.bundle");
        assert_eq!(bundle.diploid(), PathBuf::from("/models/HiFi.bundle/diploid_model"));
        assert_eq!(
            bundle.haploid_hp(),
            PathBuf::from("/models/HiFi.bundle/haploid_hp_model")
        );
    }
}
