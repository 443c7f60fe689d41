use rand::{Rng, RngCore};

pub type Face = u8;

pub const FACES: Face = 6;
pub const CRIT_FACE: Face = 1;
pub const EXPLODE_FACE: Face = FACES;

/// Anything that can throw a fair d6.
pub trait FaceSource {
    fn roll_face(&mut self) -> Face;

    fn roll_faces(&mut self, n: usize) -> Vec<Face> {
        (0..n).map(|_| self.roll_face()).collect()
    }
}

impl<G> FaceSource for G
where
    G: RngCore,
{
    fn roll_face(&mut self) -> Face {
        self.gen_range(1..=FACES)
    }
}
