use nalgebra::{RealField, SMatrix};
use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::SL;

impl<const N: usize, T> Serialize for SL<N, T>
where
    T: RealField + Copy + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.matrix.serialize(serializer)
    }
}

/// Deserialized matrices go through the same coercion as the text reader.
impl<'de, const N: usize, T> Deserialize<'de> for SL<N, T>
where
    T: RealField + Copy + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let matrix = SMatrix::<T, N, N>::deserialize(deserializer)?;
        SL::from_matrix(&matrix).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Matrix2, Vector3};

    type SL2 = SL<2>;

    #[test]
    fn test_serialize_as_matrix() {
        let json = serde_json::to_string(&SL2::identity()).unwrap();
        assert_eq!(json, "[1.0,0.0,0.0,1.0]");
    }

    #[test]
    fn test_round_trip() {
        let element = SL2::from_algebra(&Vector3::new(0.3, -0.1, 0.8)).unwrap();
        let json = serde_json::to_string(&element).unwrap();
        let restored: SL2 = serde_json::from_str(&json).unwrap();

        assert_relative_eq!(restored.matrix(), element.matrix(), epsilon = 1e-14);
    }

    #[test]
    fn test_deserialize_coerces() {
        // column-major storage
        let restored: SL2 = serde_json::from_str("[4.0, 0.0, 0.0, 1.0]").unwrap();
        assert_relative_eq!(
            restored.matrix(),
            &Matrix2::new(1.0, 0.0, 0.0, 0.25),
            epsilon = 1e-15
        );

        assert!(serde_json::from_str::<SL2>("[0.0, 0.0, 0.0, 0.0]").is_err());
        assert!(serde_json::from_str::<SL2>("[1.0, 0.0, 0.0]").is_err());
    }
}
