use crate::game_logic::errors::{CamkiiError, CamkiiResult};
use crate::game_logic::obstacles::{Microtubule, Pose};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, FRAC_PI_3, FRAC_PI_4, FRAC_PI_6, FRAC_PI_8};
use std::path::{Path, PathBuf};
use validator::Validate;

/// Everything needed to build a cell interior: scenery plus the ordered microtubule list
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Resource)]
pub struct CellLayout {
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[validate(range(min = 5.0, max = 500.0))]
    pub membrane_radius: f32,
    pub floor_height: f32,
    #[validate(nested)]
    pub nucleus: NucleusPlacement,
    pub player_spawn: Vec3,
    /// Order matters: index `i` becomes obstacle `i` for docking
    #[validate(length(max = 1024), nested)]
    pub microtubules: Vec<MicrotubulePlacement>,
}

/// Decorative nucleus sphere
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NucleusPlacement {
    pub center: Vec3,
    #[validate(range(min = 0.5, max = 100.0))]
    pub radius: f32,
}

/// One microtubule: a cylinder whose long axis is its local Z
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MicrotubulePlacement {
    pub position: Vec3,
    pub rotation: Vec3, // XYZ Euler angles in radians
    #[validate(range(min = 0.05, max = 10.0))]
    pub radius: f32,
    #[validate(range(min = 0.5, max = 200.0))]
    pub length: f32,
}

impl MicrotubulePlacement {
    pub fn new(position: Vec3, rotation: Vec3) -> Self {
        Self {
            position,
            rotation,
            radius: Microtubule::DEFAULT_RADIUS,
            length: Microtubule::DEFAULT_LENGTH,
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).with_rotation(Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        ))
    }

    pub fn to_microtubule(&self) -> CamkiiResult<Microtubule> {
        Microtubule::new(Pose::from(self.transform()), self.radius, self.length)
    }
}

impl Default for CellLayout {
    fn default() -> Self {
        let placements = [
            (Vec3::ZERO, Vec3::new(FRAC_PI_2, 0.0, 0.0)),
            (Vec3::new(-5.0, 3.0, -5.0), Vec3::new(FRAC_PI_2, 0.0, 0.0)),
            (Vec3::new(5.0, 2.0, 5.0), Vec3::new(FRAC_PI_2, FRAC_PI_4, 0.0)),
            (Vec3::new(10.0, 5.0, -10.0), Vec3::new(FRAC_PI_2, -FRAC_PI_6, 0.0)),
            (Vec3::new(-8.0, 8.0, 8.0), Vec3::new(FRAC_PI_2, FRAC_PI_3, FRAC_PI_6)),
            (Vec3::new(12.0, 1.0, 3.0), Vec3::new(FRAC_PI_2, -FRAC_PI_4, FRAC_PI_8)),
        ];

        Self {
            name: "cytoplasm".to_string(),
            membrane_radius: 50.0,
            floor_height: -10.0,
            nucleus: NucleusPlacement {
                center: Vec3::new(-20.0, 0.0, -15.0),
                radius: 15.0,
            },
            player_spawn: Vec3::new(0.0, 5.0, 5.0),
            microtubules: placements
                .into_iter()
                .map(|(position, rotation)| MicrotubulePlacement::new(position, rotation))
                .collect(),
        }
    }
}

impl CellLayout {
    /// Create a new layout with validation
    pub fn new(
        name: String,
        player_spawn: Vec3,
        microtubules: Vec<MicrotubulePlacement>,
    ) -> CamkiiResult<Self> {
        let layout = Self {
            name,
            player_spawn,
            microtubules,
            ..default()
        };

        layout.validate().map_err(|_| CamkiiError::InvalidLayoutData {
            reason: "Cell layout validation failed".to_string(),
        })?;

        Ok(layout)
    }

    /// Microtubules in obstacle order, posed at their placements
    pub fn to_microtubules(&self) -> CamkiiResult<Vec<Microtubule>> {
        self.microtubules
            .iter()
            .map(MicrotubulePlacement::to_microtubule)
            .collect()
    }

    /// Get the cells directory path
    pub fn get_cells_dir() -> CamkiiResult<PathBuf> {
        std::env::current_dir()
            .map_err(CamkiiError::ConfigDirCreationFailed)
            .map(|dir| dir.join("cells"))
    }

    /// Load a layout from the cells directory
    pub fn load_from_file<P: AsRef<Path>>(filename: P) -> CamkiiResult<Self> {
        let file_path = Self::get_cells_dir()?.join(filename);
        Self::load_from_path(&file_path)
    }

    pub fn load_from_path(file_path: &Path) -> CamkiiResult<Self> {
        if !file_path.exists() {
            return Err(CamkiiError::LayoutFileNotFound {
                path: file_path.to_path_buf(),
            });
        }

        let data = std::fs::read(file_path)?;

        let (layout, _): (CellLayout, usize) =
            bincode::serde::decode_from_slice(&data, bincode::config::standard()).map_err(|e| {
                CamkiiError::CorruptedLayoutFile {
                    reason: format!("Failed to deserialize cell layout: {e}"),
                }
            })?;

        layout.validate().map_err(|validation_errors| {
            let error_details = validation_errors
                .field_errors()
                .iter()
                .map(|(field, errors)| {
                    let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                    format!("{field}: {}", error_msgs.join(", "))
                })
                .collect::<Vec<String>>()
                .join("; ");

            CamkiiError::LayoutValidationFailed {
                reason: format!("Cell layout validation failed: {error_details}"),
            }
        })?;

        Ok(layout)
    }

    /// Save the layout to the cells directory
    pub fn save_to_file<P: AsRef<Path>>(&self, filename: P) -> CamkiiResult<PathBuf> {
        let file_path = Self::get_cells_dir()?.join(filename);
        self.save_to_path(&file_path)?;
        Ok(file_path)
    }

    pub fn save_to_path(&self, file_path: &Path) -> CamkiiResult<()> {
        // Validate before saving
        self.validate().map_err(|_| CamkiiError::InvalidLayoutData {
            reason: "Cell layout validation failed before save".to_string(),
        })?;

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data =
            bincode::serde::encode_to_vec(self, bincode::config::standard()).map_err(|e| {
                CamkiiError::InvalidLayoutData {
                    reason: format!("Failed to serialize cell layout: {e}"),
                }
            })?;

        std::fs::write(file_path, data)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::obstacles::CylinderBoundary;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("camkii-{tag}-{}.bin", std::process::id()))
    }

    #[test]
    fn test_default_layout() {
        let layout = CellLayout::default();
        assert!(layout.validate().is_ok());
        assert_eq!(layout.microtubules.len(), 6);

        let tubes = layout.to_microtubules().unwrap();
        assert_eq!(tubes[1].pose.translation, Vec3::new(-5.0, 3.0, -5.0));
        assert_eq!(tubes[0].radius(), 0.5);
        assert_eq!(tubes[0].length(), 10.0);
    }

    #[test]
    fn test_placement_rotation_turns_axis() {
        // A quarter turn about X lays the Z axis along -Y
        let placement = MicrotubulePlacement::new(Vec3::ZERO, Vec3::new(FRAC_PI_2, 0.0, 0.0));
        let axis = placement.to_microtubule().unwrap().axis();
        assert!((axis.direction - Vec3::NEG_Y).length() < 1e-5);
    }

    #[test]
    fn test_invalid_layout_rejected() {
        let mut placement = MicrotubulePlacement::new(Vec3::ZERO, Vec3::ZERO);
        placement.radius = 0.0;
        let result = CellLayout::new("bad".to_string(), Vec3::ZERO, vec![placement]);
        assert!(matches!(result, Err(CamkiiError::InvalidLayoutData { .. })));

        let result = CellLayout::new(String::new(), Vec3::ZERO, vec![]);
        assert!(result.is_err());
    }

    #[test]
    fn test_layout_file_roundtrip() {
        let path = temp_path("layout");
        let layout = CellLayout::new(
            "roundtrip".to_string(),
            Vec3::new(1.0, 2.0, 3.0),
            vec![MicrotubulePlacement::new(Vec3::new(4.0, 0.0, 0.0), Vec3::ZERO)],
        )
        .unwrap();

        layout.save_to_path(&path).unwrap();
        let loaded = CellLayout::load_from_path(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.name, "roundtrip");
        assert_eq!(loaded.player_spawn, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(loaded.microtubules[0].position, Vec3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_missing_and_corrupted_files() {
        let missing = CellLayout::load_from_path(&temp_path("missing"));
        assert!(matches!(missing, Err(CamkiiError::LayoutFileNotFound { .. })));

        let path = temp_path("corrupt");
        std::fs::write(&path, [0xff, 0xff, 0xff]).unwrap();
        let corrupt = CellLayout::load_from_path(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(corrupt, Err(CamkiiError::CorruptedLayoutFile { .. })));
    }
}
