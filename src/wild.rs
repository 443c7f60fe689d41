use crate::source::{Face, FaceSource, EXPLODE_FACE};
use crate::{Error, Result, MAX_EXPLOSIONS};

/// Rolls the wild die, rolling again on every six.
///
/// The returned faces are in roll order. Every face but the last is a six;
/// the last one is never a six.
pub fn roll_wild<S>(source: &mut S) -> Result<Vec<Face>>
where
    S: FaceSource + ?Sized,
{
    let mut faces = Vec::with_capacity(2);
    loop {
        let face = source.roll_face();
        faces.push(face);
        if face != EXPLODE_FACE {
            return Ok(faces);
        }
        if faces.len() > MAX_EXPLOSIONS {
            return Err(Error::ExhaustedRecursion(MAX_EXPLOSIONS));
        }
    }
}
