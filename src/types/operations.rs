//! Operation requests and the parameter types collected by the editing UI.

use std::fmt;
use std::str::FromStr;

use crate::error::RequestError;
use crate::image::ImageSource;

/// A `data:<mime>;base64,<payload>` URL holding a result image.
pub type DataUrl = String;

/// The kind of editing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Localized edit around a hotspot.
    Edit,
    /// Stylistic filter over the whole image.
    Filter,
    /// Global photographic adjustment.
    Adjust,
    /// Outpainting into transparent / masked regions.
    Expand,
    /// Insertion of a second image into the first.
    Composite,
    /// Subject cut-out onto a new background.
    RemoveBackground,
}

impl OperationKind {
    /// All operation kinds.
    pub const ALL: [OperationKind; 6] = [
        OperationKind::Edit,
        OperationKind::Filter,
        OperationKind::Adjust,
        OperationKind::Expand,
        OperationKind::Composite,
        OperationKind::RemoveBackground,
    ];

    /// Stable identifier used in logs, spans and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Edit => "edit",
            OperationKind::Filter => "filter",
            OperationKind::Adjust => "adjust",
            OperationKind::Expand => "expand",
            OperationKind::Composite => "composite",
            OperationKind::RemoveBackground => "remove_background",
        }
    }
}

/// Renders the noun used in user-facing messages ("... for the expansion").
impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = match self {
            OperationKind::Edit => "edit",
            OperationKind::Filter => "filter",
            OperationKind::Adjust => "adjustment",
            OperationKind::Expand => "expansion",
            OperationKind::Composite => "composition",
            OperationKind::RemoveBackground => "background removal",
        };
        f.write_str(noun)
    }
}

/// Pixel coordinate marking the focus point of a localized edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hotspot {
    /// Horizontal pixel offset from the left edge.
    pub x: u32,
    /// Vertical pixel offset from the top edge.
    pub y: u32,
}

impl Hotspot {
    /// Creates a hotspot.
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Target aspect ratio for generative expand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AspectRatio {
    /// 9:16 portrait.
    Portrait9x16,
    /// 4:5 portrait.
    Portrait4x5,
    /// 2:3 portrait.
    Portrait2x3,
    /// 1:1 square.
    Square,
    /// 16:9 landscape.
    Landscape16x9,
    /// 4:3 landscape.
    Landscape4x3,
    /// 3:2 landscape.
    Landscape3x2,
    /// 2:1 banner.
    Banner2x1,
    /// 3:1 banner.
    Banner3x1,
    /// Any other width / height ratio.
    Custom(f64),
}

impl AspectRatio {
    /// The preset ratios offered by the expand panel.
    pub const PRESETS: [AspectRatio; 9] = [
        AspectRatio::Portrait9x16,
        AspectRatio::Portrait4x5,
        AspectRatio::Portrait2x3,
        AspectRatio::Square,
        AspectRatio::Landscape16x9,
        AspectRatio::Landscape4x3,
        AspectRatio::Landscape3x2,
        AspectRatio::Banner2x1,
        AspectRatio::Banner3x1,
    ];

    /// Width divided by height.
    pub fn value(&self) -> f64 {
        match self {
            AspectRatio::Portrait9x16 => 9.0 / 16.0,
            AspectRatio::Portrait4x5 => 4.0 / 5.0,
            AspectRatio::Portrait2x3 => 2.0 / 3.0,
            AspectRatio::Square => 1.0,
            AspectRatio::Landscape16x9 => 16.0 / 9.0,
            AspectRatio::Landscape4x3 => 4.0 / 3.0,
            AspectRatio::Landscape3x2 => 3.0 / 2.0,
            AspectRatio::Banner2x1 => 2.0,
            AspectRatio::Banner3x1 => 3.0,
            AspectRatio::Custom(ratio) => *ratio,
        }
    }

    /// Returns the ratio after checking it is finite and positive.
    pub fn validated(&self) -> Result<f64, RequestError> {
        let ratio = self.value();
        if ratio.is_finite() && ratio > 0.0 {
            Ok(ratio)
        } else {
            Err(RequestError::InvalidParameter {
                parameter: "aspect_ratio".to_string(),
                message: format!("must be a positive finite number, got {ratio}"),
            })
        }
    }
}

/// Parses `"W:H"` (for example `"16:9"`) or a plain decimal ratio.
impl FromStr for AspectRatio {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || RequestError::InvalidParameter {
            parameter: "aspect_ratio".to_string(),
            message: format!("cannot parse '{s}' as W:H or a decimal ratio"),
        };

        let ratio = match s.trim().split_once(':') {
            Some((w, h)) => {
                let w: f64 = w.trim().parse().map_err(|_| invalid())?;
                let h: f64 = h.trim().parse().map_err(|_| invalid())?;
                if h == 0.0 {
                    return Err(invalid());
                }
                w / h
            }
            None => s.trim().parse().map_err(|_| invalid())?,
        };

        let preset = Self::PRESETS
            .into_iter()
            .find(|preset| (preset.value() - ratio).abs() < 1e-9);

        let aspect = preset.unwrap_or(AspectRatio::Custom(ratio));
        aspect.validated()?;
        Ok(aspect)
    }
}

/// A `#RRGGBB` colour, normalised to upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexColor(String);

impl HexColor {
    /// Returns the `#RRGGBB` form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self("#FFFFFF".to_string())
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Accepts `#RGB` and `#RRGGBB`, with or without the leading `#`.
impl FromStr for HexColor {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(RequestError::InvalidParameter {
                parameter: "color".to_string(),
                message: format!("'{s}' is not a hex colour"),
            });
        }

        let expanded = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 => digits.to_string(),
            _ => {
                return Err(RequestError::InvalidParameter {
                    parameter: "color".to_string(),
                    message: format!("'{s}' must have 3 or 6 hex digits"),
                })
            }
        };

        Ok(Self(format!("#{}", expanded.to_ascii_uppercase())))
    }
}

/// What replaces the background when it is removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BackgroundFill {
    /// Fully transparent background.
    #[default]
    Transparent,
    /// Solid colour background.
    Color(HexColor),
}

/// Localized edit around a hotspot.
#[derive(Debug, Clone)]
pub struct EditRequest {
    /// Image to edit.
    pub image: ImageSource,
    /// What to change.
    pub prompt: String,
    /// Where to focus the change.
    pub hotspot: Hotspot,
}

/// Stylistic filter over the whole image.
#[derive(Debug, Clone)]
pub struct FilterRequest {
    /// Image to restyle.
    pub image: ImageSource,
    /// The filter description.
    pub prompt: String,
}

/// Global photographic adjustment.
#[derive(Debug, Clone)]
pub struct AdjustRequest {
    /// Image to adjust.
    pub image: ImageSource,
    /// The adjustment description.
    pub prompt: String,
}

/// Generative fill of transparent or masked regions.
#[derive(Debug, Clone)]
pub struct ExpandRequest {
    /// Base image, usually the original centred on a transparent canvas.
    pub image: ImageSource,
    /// Mask where white marks regions to generate. Derived from the base
    /// image's transparency when absent.
    pub mask: Option<ImageSource>,
    /// Optional guidance; may be empty.
    pub prompt: String,
}

/// Insertion of one image into a background.
#[derive(Debug, Clone)]
pub struct CompositeRequest {
    /// The scene to insert into.
    pub background: ImageSource,
    /// The object or person to insert.
    pub insert: ImageSource,
}

/// Subject cut-out onto a new background.
#[derive(Debug, Clone)]
pub struct RemoveBackgroundRequest {
    /// Image whose background is replaced.
    pub image: ImageSource,
    /// Replacement background.
    pub fill: BackgroundFill,
}

/// Any editing operation.
#[derive(Debug, Clone)]
pub enum OperationRequest {
    /// See [`EditRequest`].
    Edit(EditRequest),
    /// See [`FilterRequest`].
    Filter(FilterRequest),
    /// See [`AdjustRequest`].
    Adjust(AdjustRequest),
    /// See [`ExpandRequest`].
    Expand(ExpandRequest),
    /// See [`CompositeRequest`].
    Composite(CompositeRequest),
    /// See [`RemoveBackgroundRequest`].
    RemoveBackground(RemoveBackgroundRequest),
}

impl OperationRequest {
    /// The kind of this request.
    pub fn kind(&self) -> OperationKind {
        match self {
            OperationRequest::Edit(_) => OperationKind::Edit,
            OperationRequest::Filter(_) => OperationKind::Filter,
            OperationRequest::Adjust(_) => OperationKind::Adjust,
            OperationRequest::Expand(_) => OperationKind::Expand,
            OperationRequest::Composite(_) => OperationKind::Composite,
            OperationRequest::RemoveBackground(_) => OperationKind::RemoveBackground,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_kind_nouns() {
        assert_eq!(OperationKind::Adjust.to_string(), "adjustment");
        assert_eq!(OperationKind::Expand.to_string(), "expansion");
        assert_eq!(OperationKind::Composite.to_string(), "composition");
        assert_eq!(OperationKind::RemoveBackground.as_str(), "remove_background");
    }

    #[test]
    fn test_aspect_ratio_parse_presets() {
        assert_eq!("16:9".parse::<AspectRatio>().unwrap(), AspectRatio::Landscape16x9);
        assert_eq!("1:1".parse::<AspectRatio>().unwrap(), AspectRatio::Square);
        assert_eq!("3".parse::<AspectRatio>().unwrap(), AspectRatio::Banner3x1);
        assert_eq!("5:4".parse::<AspectRatio>().unwrap(), AspectRatio::Custom(1.25));
    }

    #[test]
    fn test_aspect_ratio_rejects_invalid() {
        assert!("16:0".parse::<AspectRatio>().is_err());
        assert!("wide".parse::<AspectRatio>().is_err());
        assert!("-2".parse::<AspectRatio>().is_err());
        assert!(AspectRatio::Custom(f64::NAN).validated().is_err());
    }

    #[test]
    fn test_hex_color_normalisation() {
        assert_eq!("#ffffff".parse::<HexColor>().unwrap().as_str(), "#FFFFFF");
        assert_eq!("0a0".parse::<HexColor>().unwrap().as_str(), "#00AA00");
        assert_eq!(" #1e90ff ".parse::<HexColor>().unwrap().as_str(), "#1E90FF");
    }

    #[test]
    fn test_hex_color_rejects_invalid() {
        assert!("#12345".parse::<HexColor>().is_err());
        assert!("#GGGGGG".parse::<HexColor>().is_err());
        assert!("".parse::<HexColor>().is_err());
        assert!("##fff".parse::<HexColor>().is_err());
    }
}
