//! Cartesian to longitude/latitude conversion.
//!
//! Points are treated as directions from the origin; no radius is enforced.
//! Longitude comes from `atan2(y, x)` and lies in (-180, 180]; latitude is
//! `asin(z / r)` in [-90, 90].
//!
//! A vertex at the origin has `r == 0`, so `z / r` is NaN and so is its
//! latitude. This is not special-cased here; see
//! [`DegenerateHandling`](crate::convert::DegenerateHandling) for how the
//! conversion pipeline reports it.

use crate::mesh_error::MeshUgridError;
use ndarray::{Array1, Array2, ArrayView2, Axis};

/// Converts one Cartesian point to `(lon, lat)` in degrees.
#[inline]
pub fn xyz_to_lonlat_deg_point([x, y, z]: [f64; 3]) -> (f64, f64) {
    let r = (x * x + y * y + z * z).sqrt();
    // clamp guards against |z / r| drifting past 1 by rounding; NaN passes through
    let lat = (z / r).clamp(-1.0, 1.0).asin().to_degrees();
    // `-0.0 + 0.0` is `+0.0`, so a signed-zero y on the negative x axis maps to 180, not -180
    let lon = (y + 0.0).atan2(x).to_degrees();
    (lon, lat)
}

/// Converts an `(N, 3)` array of Cartesian coordinates to longitude and
/// latitude arrays, both of length `N`, in degrees.
pub fn xyz_to_lonlat_deg(
    xyz: &ArrayView2<'_, f64>,
) -> Result<(Array1<f64>, Array1<f64>), MeshUgridError> {
    if xyz.ncols() != 3 {
        return Err(MeshUgridError::InvalidShape {
            name: "xyz".into(),
            expected: "(n, 3)".into(),
            found: xyz.shape().to_vec(),
        });
    }
    let n = xyz.nrows();
    let mut lon = Array1::zeros(n);
    let mut lat = Array1::zeros(n);
    for (i, row) in xyz.axis_iter(Axis(0)).enumerate() {
        let (lo, la) = xyz_to_lonlat_deg_point([row[0], row[1], row[2]]);
        lon[i] = lo;
        lat[i] = la;
    }
    Ok((lon, lat))
}

/// Maps longitude/latitude in degrees back onto the unit sphere.
///
/// Returns an `(N, 3)` array. `lon` and `lat` must have the same length.
pub fn lonlat_deg_to_xyz(lon: &[f64], lat: &[f64]) -> Result<Array2<f64>, MeshUgridError> {
    if lon.len() != lat.len() {
        return Err(MeshUgridError::InvalidShape {
            name: "node_lat".into(),
            expected: format!("({},)", lon.len()),
            found: vec![lat.len()],
        });
    }
    let mut out = Array2::zeros((lon.len(), 3));
    for (mut row, (&lo, &la)) in out.axis_iter_mut(Axis(0)).zip(lon.iter().zip(lat)) {
        let (lo, la) = (lo.to_radians(), la.to_radians());
        row[0] = la.cos() * lo.cos();
        row[1] = la.cos() * lo.sin();
        row[2] = la.sin();
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    const EPS: f64 = 1e-12;

    #[test]
    fn equator_octants() {
        let xyz = array![
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, -1.0, 0.0]
        ];
        let (lon, lat) = xyz_to_lonlat_deg(&xyz.view()).unwrap();
        for (got, want) in lon.iter().zip([0.0, 90.0, 180.0, -90.0]) {
            assert!((got - want).abs() < EPS, "lon {got} != {want}");
        }
        assert!(lat.iter().all(|l| l.abs() < EPS));
    }

    #[test]
    fn poles_and_radius_independence() {
        let (lon, lat) = xyz_to_lonlat_deg_point([0.0, 0.0, 6371.0]);
        assert_eq!(lon, 0.0);
        assert!((lat - 90.0).abs() < EPS);
        let (_, lat) = xyz_to_lonlat_deg_point([0.0, 0.0, -0.5]);
        assert!((lat + 90.0).abs() < EPS);
        let (lon, lat) = xyz_to_lonlat_deg_point([2.0, 2.0, 8f64.sqrt()]);
        assert!((lon - 45.0).abs() < EPS);
        assert!((lat - 45.0).abs() < 1e-9);
    }

    #[test]
    fn negative_zero_y_on_negative_x_axis_is_180() {
        let (lon, lat) = xyz_to_lonlat_deg_point([-1.0, -0.0, 0.0]);
        assert_eq!(lon, 180.0);
        assert_eq!(lat, 0.0);
        let (lon, _) = xyz_to_lonlat_deg_point([-1.0, -1e-300, 0.0]);
        assert!(lon < -179.0);
    }

    #[test]
    fn origin_produces_nan_latitude() {
        let (lon, lat) = xyz_to_lonlat_deg_point([0.0, 0.0, 0.0]);
        assert!(lat.is_nan());
        assert_eq!(lon, 0.0);
    }

    #[test]
    fn wrong_column_count_is_rejected() {
        let xy = array![[1.0, 0.0], [0.0, 1.0]];
        let err = xyz_to_lonlat_deg(&xy.view()).unwrap_err();
        assert!(matches!(err, MeshUgridError::InvalidShape { found, .. } if found == vec![2, 2]));
    }

    #[test]
    fn inverse_lands_on_unit_sphere() {
        let xyz = lonlat_deg_to_xyz(&[0.0, 90.0, 180.0], &[0.0, 0.0, 90.0]).unwrap();
        let expected = array![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
        for (a, b) in xyz.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
        assert!(lonlat_deg_to_xyz(&[0.0], &[]).is_err());
    }
}
