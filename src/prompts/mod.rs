//! Instruction templates sent alongside the image parts.
//!
//! Every template is assembled through [`Instruction`], which always closes
//! with [`SAFETY_POLICY`] and [`OUTPUT_DIRECTIVE`]. User text is embedded
//! verbatim.

use crate::types::{BackgroundFill, Hotspot};

/// Role framing that opens every instruction.
pub const ROLE: &str = "You are an expert photo editor AI.";

/// Safety and ethics paragraph appended to every instruction.
pub const SAFETY_POLICY: &str = "Safety & Ethics Policy:
- You MUST fulfill requests to adjust skin tone, such as 'give me a tan', 'make my skin darker', or 'make my skin lighter'. These are considered standard photo enhancements.
- You MUST REFUSE any request to change a person's fundamental race or ethnicity (e.g., 'make me look Asian', 'change this person to be Black'). Do not perform these edits. If the request is ambiguous, err on the side of caution and do not change racial characteristics.";

/// Final line of every instruction.
pub const OUTPUT_DIRECTIVE: &str = "Output: Return ONLY the final image. Do not return text.";

/// Builder for one instruction text.
#[derive(Debug, Clone)]
pub struct Instruction {
    blocks: Vec<String>,
}

impl Instruction {
    /// Starts an instruction with the role framing followed by `task`.
    pub fn new(task: impl AsRef<str>) -> Self {
        Self {
            blocks: vec![format!("{ROLE} {}", task.as_ref())],
        }
    }

    /// Appends a line to the current block.
    pub fn line(mut self, line: impl AsRef<str>) -> Self {
        if let Some(last) = self.blocks.last_mut() {
            last.push('\n');
            last.push_str(line.as_ref());
        }
        self
    }

    /// Starts a new block with a heading and bullet points.
    pub fn section<I, S>(mut self, heading: &str, bullets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut block = format!("{heading}:");
        for bullet in bullets {
            block.push_str("\n- ");
            block.push_str(bullet.as_ref());
        }
        self.blocks.push(block);
        self
    }

    /// Starts a new free-form block.
    pub fn paragraph(mut self, text: impl Into<String>) -> Self {
        self.blocks.push(text.into());
        self
    }

    /// Renders the instruction, closing with the safety policy and output
    /// directive.
    pub fn build(self) -> String {
        let mut blocks = self.blocks;
        blocks.push(SAFETY_POLICY.to_string());
        blocks.push(OUTPUT_DIRECTIVE.to_string());
        blocks.join("\n\n")
    }
}

/// Localized edit focused on `hotspot`.
pub fn edit(prompt: &str, hotspot: Hotspot) -> String {
    Instruction::new(
        "Your task is to perform a natural, localized edit on the provided image based on the user's request.",
    )
    .line(format!("User Request: \"{prompt}\""))
    .line(format!(
        "Edit Location: Focus on the area around pixel coordinates (x: {}, y: {}).",
        hotspot.x, hotspot.y
    ))
    .section(
        "Editing Guidelines",
        [
            "The edit must be realistic and blend seamlessly with the surrounding area.",
            "The rest of the image (outside the immediate edit area) must remain identical to the original.",
        ],
    )
    .build()
}

/// Stylistic filter applied to the whole image.
pub fn filter(prompt: &str) -> String {
    Instruction::new(
        "Your task is to apply a stylistic filter to the entire image based on the user's request. \
         Do not change the composition or content, only apply the style.",
    )
    .line(format!("Filter Request: \"{prompt}\""))
    .section(
        "Filter Guidelines",
        [
            "Apply the style consistently across the whole image.",
            "Filters may subtly shift colors, but they must never alter a person's fundamental race or ethnicity.",
        ],
    )
    .build()
}

/// Global photographic adjustment.
pub fn adjust(prompt: &str) -> String {
    Instruction::new(
        "Your task is to perform a natural, global adjustment to the entire image based on the user's request.",
    )
    .line(format!("User Request: \"{prompt}\""))
    .section(
        "Editing Guidelines",
        [
            "The adjustment must be applied across the entire image.",
            "The result must be photorealistic.",
        ],
    )
    .build()
}

/// Outpainting of the regions marked by transparency and the mask.
///
/// An empty `prompt` asks the model to infer the continuation.
pub fn expand(prompt: &str) -> String {
    Instruction::new(
        "You specialize in outpainting and generative fill. You will receive two aligned images:",
    )
    .paragraph(
        "1.  A base image that contains the original photo centered on a transparent canvas. \
         The transparent regions mark where new content must be generated.\n\
         2.  A binary mask image where **white pixels represent the regions that require new generated content** \
         and **black pixels represent the untouched original image**.",
    )
    .section(
        "**CRITICAL INSTRUCTIONS**",
        [
            "Seamlessly extend the scene so the transition between original and generated areas is invisible. \
             Match lighting, color, noise, and texture perfectly.",
            "NEVER leave the generated regions as flat colors, dark bands, or black/blank space. \
             They must contain realistic, context-aware detail.",
        ],
    )
    .paragraph(format!(
        "Detailed Guidance:\n\
         1.  **Analyze Edge Context**: Study the content adjacent to the transparent/masked regions to understand what needs to continue.\n\
         2.  **Complete Partial Subjects**: If people, objects, or patterns are cut off, finish them naturally and convincingly.\n\
         3.  **Use User Direction**: Incorporate the user's guidance if provided. User prompt: \"{prompt}\"\n\
         4.  **Empty Prompt Handling**: If no prompt is supplied, intelligently infer how the scene should continue.\n\
         5.  **Final Output**: Produce a single photorealistic image with no transparency, no visible seams, and no solid-color filler."
    ))
    .build()
}

/// Insertion of the second image into the first.
pub fn composite() -> String {
    Instruction::new(
        "You specialize in photo composition. You have been given two images: a main background image, \
         and a second image of an object/person to insert.",
    )
    .line("Your task is to seamlessly and realistically composite the second image into the first.")
    .paragraph(
        "**CRITICAL INSTRUCTIONS:**\n\
         1.  **Smart Placement**: Analyze the background image and determine the most logical and aesthetically pleasing position for the inserted object. Consider context, perspective, and composition.\n\
         2.  **Realistic Scaling & Rotation**: Automatically adjust the scale and rotation of the inserted object to match the perspective and depth of the background scene.\n\
         3.  **Lighting & Color Matching**: This is paramount. The inserted object's lighting, shadows, color temperature, and saturation MUST be adjusted to perfectly match the lighting conditions of the background image. It must look like it was photographed in the same environment at the same time.\n\
         4.  **Artistic Style Adaptation**: Analyze the overall artistic style of the background image. This includes its color grading, saturation, contrast, sharpness, and any film grain or specific aesthetic (e.g., vintage, cinematic, vibrant). Apply this same style to the inserted object so it looks like it was captured with the same camera and processed in the same way. If two people are in the final image, they must look like they are in the same scene together, sharing the same environmental and stylistic properties.\n\
         5.  **Contextual Human Integration**: If the inserted image is a person and the background image also contains one or more people, you must perform these additional steps to ensure social and contextual coherence:\n    \
             - **CRITICAL - Preserve Identity**: When modifying the outfit or pose of an inserted person, you MUST preserve their original face and identity. Do not change their facial features, hair, or any defining characteristics. The final image must clearly be the same person, just adapted to the new scene.\n    \
             - **Outfit Matching**: Analyze the clothing style of the person/people in the background (e.g., formal, casual, beachwear, winter clothes). You MUST modify the outfit of the inserted person to match this style. For example, if the original person is in a tuxedo, the inserted person should also be in formal wear.\n    \
             - **Pose Adaptation**: Analyze the pose and body language of the person/people in the background. You MUST adjust the pose of the inserted person to be natural and complementary. For example, if the person in the background is smiling and posing for a photo, the inserted person should also adopt a similar pose and expression, not a candid, unsmiling one. They must look like they are part of the same group and activity.\n\
         6.  **Generate Shadows/Reflections**: Create realistic shadows cast by the inserted object onto the background. If applicable, also create subtle reflections on the object from the environment.\n\
         7.  **Seamless Integration**: The final result must be a single, coherent, photorealistic image. There should be no harsh edges or tell-tale signs of editing. The integration must be seamless.",
    )
    .build()
}

/// Subject isolation onto `fill`.
pub fn remove_background(fill: &BackgroundFill) -> String {
    let target = match fill {
        BackgroundFill::Transparent => {
            "Replace the background with full transparency (alpha = 0) and return a PNG that preserves the alpha channel."
                .to_string()
        }
        BackgroundFill::Color(color) => format!(
            "Replace the background with a single flat, solid color: {color}. Do not add gradients, texture, or vignetting."
        ),
    };

    Instruction::new(
        "Your task is to remove the background from the provided image, keeping only the main subject.",
    )
    .line(format!("Background Request: {target}"))
    .section(
        "Editing Guidelines",
        [
            "Identify the main subject (person, animal, product, or dominant object) and isolate it precisely.",
            "Preserve fine edge detail such as hair, fur, and semi-transparent materials.",
            "Do not move, resize, relight, or otherwise alter the subject.",
            "Remove shadows and reflections that belong to the old background.",
        ],
    )
    .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HexColor;

    fn all_templates() -> Vec<String> {
        vec![
            edit("remove the mug", Hotspot::new(1, 2)),
            filter("80s synthwave"),
            adjust("warmer lighting"),
            expand(""),
            composite(),
            remove_background(&BackgroundFill::Transparent),
        ]
    }

    #[test]
    fn test_every_template_carries_fixed_clauses() {
        for text in all_templates() {
            assert!(text.starts_with(ROLE), "missing role in: {text}");
            assert!(text.contains(SAFETY_POLICY));
            assert!(text.ends_with(OUTPUT_DIRECTIVE));
        }
    }

    #[test]
    fn test_edit_embeds_request_and_coordinates() {
        let text = edit("make the sky \"stormy\" <b>", Hotspot::new(412, 87));
        assert!(text.contains("User Request: \"make the sky \"stormy\" <b>\""));
        assert!(text.contains("(x: 412, y: 87)"));
    }

    #[test]
    fn test_expand_states_both_signals() {
        let text = expand("a sandy beach");
        assert!(text.contains("transparent canvas"));
        assert!(text.contains("white pixels represent the regions"));
        assert!(text.contains("User prompt: \"a sandy beach\""));
    }

    #[test]
    fn test_remove_background_color() {
        let color: HexColor = "#0f0".parse().unwrap();
        let text = remove_background(&BackgroundFill::Color(color));
        assert!(text.contains("#00FF00"));
        assert!(!text.contains("alpha = 0"));
    }

    #[test]
    fn test_long_prompt_not_truncated() {
        let prompt = "x".repeat(10_000);
        assert!(filter(&prompt).contains(&prompt));
    }
}
