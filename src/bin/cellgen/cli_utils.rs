use bevy::prelude::*;
use camkii::game_logic::errors::{CamkiiError, CamkiiResult};
use std::path::Path;

/// Parse position string "X,Y,Z"
pub fn parse_position(pos_str: &str) -> CamkiiResult<Vec3> {
    let parts: Vec<&str> = pos_str.split(',').collect();
    if parts.len() != 3 {
        return Err(CamkiiError::InvalidLayoutData {
            reason: format!("Invalid position format '{pos_str}'. Expected 3 ,-separated values"),
        });
    }

    let mut values = [0.0f32; 3];
    for (value, part) in values.iter_mut().zip(&parts) {
        *value = part.trim().parse().map_err(|_| CamkiiError::InvalidLayoutData {
            reason: format!("Invalid position value: '{part}'"),
        })?;
    }

    Ok(Vec3::from_array(values))
}

/// Reject output paths that would escape the cells directory
pub fn validate_output_path(filename: &str) -> CamkiiResult<()> {
    if Path::new(filename).is_absolute() {
        return Err(CamkiiError::InvalidLayoutData {
            reason: format!(
                "Output path must be relative to the cells/ directory, got absolute path: {filename}"
            ),
        });
    }

    if filename.contains("..") {
        return Err(CamkiiError::InvalidLayoutData {
            reason: "Output path cannot contain '..'".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_position() {
        assert_eq!(parse_position("1, 2.5,-3").unwrap(), Vec3::new(1.0, 2.5, -3.0));
        assert!(parse_position("1,2").is_err());
        assert!(parse_position("a,b,c").is_err());
    }

    #[test]
    fn test_validate_output_path() {
        assert!(validate_output_path("cell.bin").is_ok());
        assert!(validate_output_path("sets/cell.bin").is_ok());
        assert!(validate_output_path("../cell.bin").is_err());
        assert!(validate_output_path("/tmp/cell.bin").is_err());
    }
}
