//! Style parameters and prompt composition.
//!
//! A [`StyleSelection`] is five closed enumerations; [`compose`] folds it
//! into the synthesis prompt by concatenating fixed fragments in a fixed
//! order. Fragment selection is pure table lookup, so composition is total
//! and deterministic over every selection.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Dating app the photo is targeted at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DatingApp {
    Tinder,
    Pairs,
    With,
    Tapple,
    Tokare,
    Natural,
}

impl DatingApp {
    pub fn id(&self) -> &'static str {
        match self {
            DatingApp::Tinder => "tinder",
            DatingApp::Pairs => "pairs",
            DatingApp::With => "with",
            DatingApp::Tapple => "tapple",
            DatingApp::Tokare => "tokare",
            DatingApp::Natural => "natural",
        }
    }

    /// Wardrobe/style clause for the targeted app. `Natural` takes the
    /// generic fallback clause, as does any future member without a
    /// dedicated entry.
    fn clause(&self) -> &'static str {
        match self {
            DatingApp::Tinder => "trendy casual outfit, urban modern style, ",
            DatingApp::Pairs => "smart casual clothing, trustworthy appearance, ",
            DatingApp::With => "casual comfortable clothing, active lifestyle, ",
            DatingApp::Tapple => "bright colorful outfit, youthful energy, ",
            DatingApp::Tokare => "luxury designer clothing, sophisticated style, ",
            DatingApp::Natural => "casual versatile outfit, ",
        }
    }
}

/// Shooting location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Situation {
    Cafe,
    Outdoor,
    Urban,
    Studio,
    Home,
    Office,
}

impl Situation {
    pub fn id(&self) -> &'static str {
        match self {
            Situation::Cafe => "cafe",
            Situation::Outdoor => "outdoor",
            Situation::Urban => "urban",
            Situation::Studio => "studio",
            Situation::Home => "home",
            Situation::Office => "office",
        }
    }

    fn clause(&self) -> &'static str {
        match self {
            Situation::Cafe => "modern cafe setting, ",
            Situation::Outdoor => "natural outdoor environment, ",
            Situation::Urban => "stylish urban background, ",
            Situation::Studio => "professional studio setting, ",
            Situation::Home => "comfortable home interior, ",
            Situation::Office => "modern office environment, ",
        }
    }
}

/// Framing of the subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Pose {
    FullBody,
    UpperBody,
    Headshot,
    SideProfile,
}

impl Pose {
    pub fn id(&self) -> &'static str {
        match self {
            Pose::FullBody => "full_body",
            Pose::UpperBody => "upper_body",
            Pose::Headshot => "headshot",
            Pose::SideProfile => "side_profile",
        }
    }
}

/// Facial expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    Smile,
    Gentle,
    Cool,
    Confident,
}

impl Expression {
    pub fn id(&self) -> &'static str {
        match self {
            Expression::Smile => "smile",
            Expression::Gentle => "gentle",
            Expression::Cool => "cool",
            Expression::Confident => "confident",
        }
    }
}

/// Overall mood of the photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Atmosphere {
    Bright,
    Warm,
    Elegant,
    Natural,
    Professional,
}

impl Atmosphere {
    pub fn id(&self) -> &'static str {
        match self {
            Atmosphere::Bright => "bright",
            Atmosphere::Warm => "warm",
            Atmosphere::Elegant => "elegant",
            Atmosphere::Natural => "natural",
            Atmosphere::Professional => "professional",
        }
    }
}

/// A complete set of style parameters. Every field always holds a valid
/// enumeration member; `Default` gives the selection the options screen
/// starts from, so the record is never partially populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSelection {
    pub app: DatingApp,
    pub situation: Situation,
    pub pose: Pose,
    pub expression: Expression,
    pub atmosphere: Atmosphere,
}

impl Default for StyleSelection {
    fn default() -> Self {
        Self {
            app: DatingApp::Tinder,
            situation: Situation::Cafe,
            pose: Pose::UpperBody,
            expression: Expression::Smile,
            atmosphere: Atmosphere::Bright,
        }
    }
}

/// Compose the synthesis prompt for a selection.
///
/// Fragment order matters for synthesis quality and is fixed:
/// expression+pose base clause, app clause, situation clause, atmosphere
/// clause, then the closing profile-photo clause.
pub fn compose(selection: &StyleSelection) -> String {
    let mut prompt = format!(
        "young adult with {} expression, {} shot, ",
        selection.expression.id(),
        selection.pose.id()
    );
    prompt.push_str(selection.app.clause());
    prompt.push_str(selection.situation.clause());
    prompt.push_str(selection.atmosphere.id());
    prompt.push_str(" atmosphere, high quality portrait, dating app profile style");
    prompt
}

/// Precomposed prompt for the single-pick flow, one full template per app.
pub fn template_for(app: DatingApp) -> &'static str {
    match app {
        DatingApp::Tinder => {
            "attractive young adult, confident smile, trendy casual outfit, urban background, \
             natural lighting, cool and approachable vibe, dating app photo, high quality \
             portrait, street style fashion"
        }
        DatingApp::Pairs => {
            "friendly young adult, warm genuine smile, smart casual clothing, clean bright \
             background, soft natural lighting, trustworthy and approachable, \
             relationship-focused photo, professional yet friendly"
        }
        DatingApp::With => {
            "young adult with hobby props, enthusiastic expression, casual comfortable \
             clothing, hobby-related background, bright cheerful lighting, active lifestyle, \
             interests-focused photo, engaging personality"
        }
        DatingApp::Tapple => {
            "cheerful young adult, bright energetic smile, colorful trendy outfit, fun vibrant \
             background, high-energy lighting, youthful and playful vibe, social media style \
             photo, lively personality"
        }
        DatingApp::Tokare => {
            "sophisticated young adult, elegant refined smile, luxury designer clothing, \
             upscale elegant background, premium studio lighting, high-class and polished, \
             exclusive luxury style, professional model quality"
        }
        DatingApp::Natural => {
            "young adult smiling in natural light, solo shot, casual clothing, full body, \
             blurred background, dating app profile photo style, professional photography"
        }
    }
}

/// How the prompt for a generation run is obtained. The options-driven
/// front end supplies a full selection; the single-pick front end supplies
/// only the target app and uses its fixed template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromptSpec {
    Styled(StyleSelection),
    Fixed(DatingApp),
}

impl PromptSpec {
    pub fn resolve(&self) -> String {
        match self {
            PromptSpec::Styled(selection) => compose(selection),
            PromptSpec::Fixed(app) => template_for(*app).to_string(),
        }
    }
}
