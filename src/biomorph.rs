use crate::gene::{Gene, GeneError};
use rand::Rng;
use std::f64::consts::PI;

/// Number of genes in every biomorph.
pub const GENE_COUNT: usize = 10;

/// Offspring produced per generation: one increment and one decrement
/// per gene.
pub const OFFSPRING_COUNT: usize = 2 * GENE_COUNT;

// Gene positions. The order is part of the offspring contract: offspring
// 2i bumps gene i up, offspring 2i+1 bumps it down.
const ITERATIONS: usize = 0;
const BRANCH_LENGTH_UP: usize = 1;
const BRANCH_LENGTH_DOWN: usize = 2;
const BRANCH_ANGLE_UP: usize = 3;
const BRANCH_ANGLE_DOWN: usize = 4;
const BRANCH_LENGTH_DELTA_UP: usize = 5;
const BRANCH_LENGTH_DELTA_DOWN: usize = 6;
const BRANCH_ANGLE_DELTA_UP: usize = 7;
const BRANCH_ANGLE_DELTA_DOWN: usize = 8;
const ASPECT_RATIO: usize = 9;

/// A biomorph is nothing more than a fixed bundle of ten genes; the
/// genes fully determine its rendered shape.
#[derive(Debug, Clone)]
pub struct Biomorph {
    genes: [Gene; GENE_COUNT],
}

impl Biomorph {
    /// Build a biomorph with every gene at its first step. The bounds
    /// are fixed constants, so an error here means the program itself is
    /// misconfigured and construction aborts with nothing half-built.
    pub fn new() -> Result<Self, GeneError> {
        let genes = [
            // Recursion depth: how many times to branch.
            Gene::new("Iterations", 1.0, 9.0, 9)?,
            // Segment lengths for branches heading up vs. down.
            Gene::new("Branch length (up)", -30.0, 30.0, 51)?,
            Gene::new("Branch length (down)", -30.0, 30.0, 51)?,
            // Fork half-angles for branches heading up vs. down.
            Gene::new("Branch angle (up)", -PI, 0.75 * PI, 16)?,
            Gene::new("Branch angle (down)", -PI, 0.75 * PI, 16)?,
            // Per-depth drift applied to the matching length...
            Gene::new("Branch length delta (up)", -30.0, 30.0, 31)?,
            Gene::new("Branch length delta (down)", -30.0, 30.0, 31)?,
            // ...and to the matching angle.
            Gene::new("Branch angle delta (up)", -PI, 0.75 * PI, 16)?,
            Gene::new("Branch angle delta (down)", -PI, 0.75 * PI, 16)?,
            // Horizontal stretch/squash of the whole shape.
            Gene::new("Aspect ratio", 0.2, 5.0, 25)?,
        ];
        Ok(Self { genes })
    }

    pub fn gene(&self, index: usize) -> &Gene {
        &self.genes[index]
    }

    #[cfg(test)]
    pub(crate) fn gene_mut(&mut self, index: usize) -> &mut Gene {
        &mut self.genes[index]
    }

    /// Randomize every gene, in declaration order.
    pub fn randomize(&mut self, rng: &mut impl Rng) {
        for gene in &mut self.genes {
            gene.randomize(rng);
        }
    }

    /// Generate the 20 one-step neighbors: for each gene, a clone with
    /// that gene incremented followed by a clone with it decremented.
    /// Offspring remain closely related to their parent by construction.
    pub fn generate_offspring(&self) -> Vec<Biomorph> {
        let mut offspring = Vec::with_capacity(OFFSPRING_COUNT);
        for i in 0..GENE_COUNT {
            let mut up = self.clone();
            up.genes[i].increment();
            offspring.push(up);

            let mut down = self.clone();
            down.genes[i].decrement();
            offspring.push(down);
        }
        offspring
    }

    /// Human-readable label for offspring k: the mutated gene's name
    /// plus the mutation direction.
    pub fn offspring_hint(&self, k: usize) -> String {
        if k % 2 == 0 {
            format!("{} (+)", self.genes[k / 2].name())
        } else {
            format!("{} (-)", self.genes[(k - 1) / 2].name())
        }
    }

    /// Recursion depth. The continuous gene value is truncated toward
    /// zero; the gene steps through whole numbers anyway.
    pub fn iterations(&self) -> i32 {
        self.genes[ITERATIONS].value() as i32
    }

    pub fn branch_length_up(&self) -> f64 {
        self.genes[BRANCH_LENGTH_UP].value()
    }

    pub fn branch_length_down(&self) -> f64 {
        self.genes[BRANCH_LENGTH_DOWN].value()
    }

    pub fn branch_angle_up(&self) -> f64 {
        self.genes[BRANCH_ANGLE_UP].value()
    }

    pub fn branch_angle_down(&self) -> f64 {
        self.genes[BRANCH_ANGLE_DOWN].value()
    }

    pub fn branch_length_delta_up(&self) -> f64 {
        self.genes[BRANCH_LENGTH_DELTA_UP].value()
    }

    pub fn branch_length_delta_down(&self) -> f64 {
        self.genes[BRANCH_LENGTH_DELTA_DOWN].value()
    }

    pub fn branch_angle_delta_up(&self) -> f64 {
        self.genes[BRANCH_ANGLE_DELTA_UP].value()
    }

    pub fn branch_angle_delta_down(&self) -> f64 {
        self.genes[BRANCH_ANGLE_DELTA_DOWN].value()
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.genes[ASPECT_RATIO].value()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    fn indices(b: &Biomorph) -> Vec<u32> {
        (0..GENE_COUNT).map(|i| b.gene(i).index()).collect()
    }

    #[test]
    fn fresh_biomorph_starts_at_gene_minimums() {
        let b = Biomorph::new().unwrap();
        assert_eq!(indices(&b), vec![0; GENE_COUNT]);
        assert_eq!(b.iterations(), 1);
        assert!((b.branch_length_up() + 30.0).abs() < 1e-9);
        assert!((b.aspect_ratio() - 0.2).abs() < 1e-9);
    }

    #[test]
    fn clone_is_independent() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut parent = Biomorph::new().unwrap();
        parent.randomize(&mut rng);

        let mut child = parent.clone();
        assert_eq!(indices(&parent), indices(&child));

        let before = indices(&parent);
        child.randomize(&mut rng);
        assert_eq!(indices(&parent), before);
    }

    #[test]
    fn offspring_differ_from_parent_by_one_step() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut parent = Biomorph::new().unwrap();
        parent.randomize(&mut rng);

        let offspring = parent.generate_offspring();
        assert_eq!(offspring.len(), OFFSPRING_COUNT);

        for (k, child) in offspring.iter().enumerate() {
            let gene = k / 2;
            for i in 0..GENE_COUNT {
                let mut expected = parent.gene(i).clone();
                if i == gene {
                    if k % 2 == 0 {
                        expected.increment();
                    } else {
                        expected.decrement();
                    }
                }
                assert_eq!(
                    child.gene(i).index(),
                    expected.index(),
                    "offspring {} gene {}",
                    k,
                    i
                );
            }
        }
    }

    #[test]
    fn offspring_hints_name_the_mutated_gene() {
        let parent = Biomorph::new().unwrap();
        assert_eq!(parent.offspring_hint(0), "Iterations (+)");
        assert_eq!(parent.offspring_hint(1), "Iterations (-)");
        assert_eq!(parent.offspring_hint(18), "Aspect ratio (+)");
        assert_eq!(parent.offspring_hint(19), "Aspect ratio (-)");
    }
}
