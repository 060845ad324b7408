//! Instruction text and fixed parameters sent to the compositing endpoint.

use serde::Serialize;

use crate::image_type::KeyImageType;

/// Instruction shared by every key angle.
pub const BASE_INSTRUCTION: &str = "Replace the background of this vehicle photo with the \
    provided background template. Keep the vehicle exactly as photographed: do not alter its \
    shape, paint colour, wheels, badges, glass reflections or licence plate. Ground the vehicle \
    on the new floor with a soft, realistic contact shadow and match the lighting of the \
    template.";

/// Extra clause for a specific angle, if any.
pub fn refinement(key: KeyImageType) -> Option<&'static str> {
    match key {
        KeyImageType::FrontQuarter => Some(
            "This is a three-quarter front view; keep both the front fascia and the visible side \
             in sharp focus.",
        ),
        KeyImageType::Front => Some(
            "This is a straight-on front view; keep the grille, headlights and emblem centred \
             and symmetrical.",
        ),
        KeyImageType::BackQuarter => Some(
            "This is a three-quarter rear view; preserve the tail lights and the visible side \
             profile.",
        ),
        KeyImageType::Back => Some(
            "This is a straight-on rear view; keep the tail lights, badging and exhaust tips \
             crisp.",
        ),
        KeyImageType::DriverSide | KeyImageType::PassengerSide => Some(
            "This is a full side profile; keep the wheelbase level and both wheels fully \
             visible.",
        ),
    }
}

/// Full instruction for `key`: the shared instruction plus its refinement.
pub fn build_prompt(key: KeyImageType) -> String {
    match refinement(key) {
        Some(extra) => format!("{BASE_INSTRUCTION} {extra}"),
        None => BASE_INSTRUCTION.to_string(),
    }
}

/// Fixed processing parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingParameters {
    pub preserve_vehicle_details: bool,
    pub adjust_color_temperature: bool,
    pub blend_mode: &'static str,
}

impl Default for ProcessingParameters {
    fn default() -> Self {
        Self {
            preserve_vehicle_details: true,
            adjust_color_temperature: true,
            blend_mode: "natural",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_type::KEY_IMAGE_SEQUENCE;

    #[test]
    fn every_prompt_starts_with_base_instruction() {
        for key in KEY_IMAGE_SEQUENCE {
            assert!(build_prompt(key).starts_with(BASE_INSTRUCTION));
        }
    }

    #[test]
    fn side_prompts_mention_profile() {
        assert!(build_prompt(KeyImageType::DriverSide).contains("side profile"));
    }

    #[test]
    fn parameters_serialize_camel_case() {
        let json = serde_json::to_value(ProcessingParameters::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "preserveVehicleDetails": true,
                "adjustColorTemperature": true,
                "blendMode": "natural",
            })
        );
    }
}
