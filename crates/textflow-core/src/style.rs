//! Style resolution: many overlapping specification shapes, one record per segment
//!
//! Callers describe segment styling through any mix of four shapes — a scalar
//! applied everywhere, an ordered sequence, a sparse index mapping, an
//! index-set mapping — plus a style bundle carrying whole property records
//! for chosen segments. This module folds all of them into one fully
//! populated [`ResolvedStyle`] per segment under a fixed priority order:
//!
//! 1. style bundle entry covering the index
//! 2. per-property index/index-set mapping
//! 3. per-property scalar
//! 4. per-property sequence (last element extends short sequences)
//! 5. caller defaults
//! 6. built-in defaults
//!
//! Resolution is index-driven, never iteration-order-driven: identical
//! inputs always produce identical output.

// this_file: crates/textflow-core/src/style.rs

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::{FlowError, Result};

/// A dynamically shaped style value as supplied by the caller.
///
/// `Map` values only appear inside style bundles, where one segment's
/// entry carries a nested name-to-value record.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Str(String),
    Num(f32),
    Bool(bool),
    Map(Vec<(String, StyleValue)>),
}

impl From<&str> for StyleValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<f32> for StyleValue {
    fn from(v: f32) -> Self {
        Self::Num(v)
    }
}

impl From<i32> for StyleValue {
    fn from(v: i32) -> Self {
        Self::Num(v as f32)
    }
}

impl From<bool> for StyleValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// Key of one mapping entry: a single segment index or an index set
/// sharing one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecKey {
    One(usize),
    Many(Vec<usize>),
}

impl SpecKey {
    fn indices(&self) -> &[usize] {
        match self {
            Self::One(i) => std::slice::from_ref(i),
            Self::Many(v) => v,
        }
    }
}

impl From<usize> for SpecKey {
    fn from(i: usize) -> Self {
        Self::One(i)
    }
}

impl From<Vec<usize>> for SpecKey {
    fn from(v: Vec<usize>) -> Self {
        Self::Many(v)
    }
}

impl<const N: usize> From<[usize; N]> for SpecKey {
    fn from(v: [usize; N]) -> Self {
        Self::Many(v.to_vec())
    }
}

/// One property specification in any of its accepted shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum RawSpec {
    /// Applies uniformly to every segment.
    Scalar(StyleValue),
    /// Positional values; a short sequence extends with its last element.
    Sequence(Vec<StyleValue>),
    /// Sparse index or index-set mapping.
    Map(Vec<(SpecKey, StyleValue)>),
}

impl From<StyleValue> for RawSpec {
    fn from(v: StyleValue) -> Self {
        Self::Scalar(v)
    }
}

impl From<&str> for RawSpec {
    fn from(v: &str) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<String> for RawSpec {
    fn from(v: String) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<f32> for RawSpec {
    fn from(v: f32) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<i32> for RawSpec {
    fn from(v: i32) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<bool> for RawSpec {
    fn from(v: bool) -> Self {
        Self::Scalar(v.into())
    }
}

impl From<Vec<StyleValue>> for RawSpec {
    fn from(v: Vec<StyleValue>) -> Self {
        Self::Sequence(v)
    }
}

/// What shape an ambiguous positional mapping turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapShape {
    /// Every value is itself a mapping: a whole-record style bundle.
    Bundle,
    /// Every value is a scalar: a single-property index mapping.
    IndexMap,
}

/// Decide whether a positional mapping is a style bundle or a
/// single-property index mapping.
///
/// Mixed shapes cannot be resolved deterministically and are rejected.
/// An empty mapping classifies as an index mapping; it has no effect
/// either way.
pub fn classify_map(entries: &[(SpecKey, StyleValue)]) -> Result<MapShape> {
    let mut maps = 0usize;
    let mut scalars = 0usize;
    for (_, value) in entries {
        match value {
            StyleValue::Map(_) => maps += 1,
            _ => scalars += 1,
        }
    }
    match (maps, scalars) {
        (0, _) => Ok(MapShape::IndexMap),
        (_, 0) => Ok(MapShape::Bundle),
        _ => Err(FlowError::config(
            "mapping mixes nested records with scalar values; \
             supply either a style bundle or a single-property index mapping",
        )),
    }
}

/// Weight of a font face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontWeight {
    Thin,
    Light,
    #[default]
    Normal,
    Medium,
    Semibold,
    Bold,
    Heavy,
}

impl FontWeight {
    /// Map a numeric weight (CSS-style 100..900 scale) onto the named buckets.
    pub fn from_number(n: f32) -> Self {
        match n {
            n if n < 250.0 => Self::Thin,
            n if n < 350.0 => Self::Light,
            n if n < 450.0 => Self::Normal,
            n if n < 550.0 => Self::Medium,
            n if n < 650.0 => Self::Semibold,
            n if n < 800.0 => Self::Bold,
            _ => Self::Heavy,
        }
    }
}

impl FromStr for FontWeight {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "thin" => Ok(Self::Thin),
            "light" => Ok(Self::Light),
            "normal" | "regular" => Ok(Self::Normal),
            "medium" => Ok(Self::Medium),
            "semibold" => Ok(Self::Semibold),
            "bold" => Ok(Self::Bold),
            "heavy" | "black" => Ok(Self::Heavy),
            other => Err(FlowError::config(format!("unknown font weight {other:?}"))),
        }
    }
}

/// Slant of a font face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

impl FromStr for FontStyle {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "normal" => Ok(Self::Normal),
            "italic" => Ok(Self::Italic),
            "oblique" => Ok(Self::Oblique),
            other => Err(FlowError::config(format!("unknown font style {other:?}"))),
        }
    }
}

/// The canonical set of recognized segment properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prop {
    Color,
    FontSize,
    FontWeight,
    FontFamily,
    FontStyle,
    Underline,
    BackgroundColor,
    Alpha,
    Rotation,
}

impl Prop {
    pub fn canonical_name(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::FontSize => "fontsize",
            Self::FontWeight => "fontweight",
            Self::FontFamily => "fontfamily",
            Self::FontStyle => "fontstyle",
            Self::Underline => "underline",
            Self::BackgroundColor => "backgroundcolor",
            Self::Alpha => "alpha",
            Self::Rotation => "rotation",
        }
    }

    /// Translate a caller-supplied property name to its canonical slot.
    ///
    /// The alias table is fixed and case-sensitive: the short font aliases
    /// (`weight`, `size`, `family`, `style`) and the plural spellings all
    /// land on the same canonical property.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "color" | "colors" => Some(Self::Color),
            "fontsize" | "fontsizes" | "size" => Some(Self::FontSize),
            "fontweight" | "fontweights" | "weight" => Some(Self::FontWeight),
            "fontfamily" | "fontfamilies" | "family" => Some(Self::FontFamily),
            "fontstyle" | "fontstyles" | "style" => Some(Self::FontStyle),
            "underline" | "underlines" => Some(Self::Underline),
            "backgroundcolor" | "backgroundcolors" => Some(Self::BackgroundColor),
            "alpha" | "alphas" => Some(Self::Alpha),
            "rotation" | "rotations" => Some(Self::Rotation),
            _ => None,
        }
    }
}

/// Font-facing subset of a resolved style, handed to measurement and
/// shaping collaborators.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
    pub weight: FontWeight,
    pub style: FontStyle,
}

/// The final, fully populated property record for one segment.
///
/// Built once by [`normalize`] and never mutated afterward. `Default`
/// carries the built-in library defaults, the lowest priority tier.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub color: String,
    pub fontsize: f32,
    pub fontweight: FontWeight,
    pub fontfamily: String,
    pub fontstyle: FontStyle,
    pub underline: bool,
    pub backgroundcolor: Option<String>,
    pub alpha: f32,
    pub rotation: f32,
}

impl Default for ResolvedStyle {
    fn default() -> Self {
        Self {
            color: "black".to_string(),
            fontsize: 12.0,
            fontweight: FontWeight::Normal,
            fontfamily: "sans-serif".to_string(),
            fontstyle: FontStyle::Normal,
            underline: false,
            backgroundcolor: None,
            alpha: 1.0,
            rotation: 0.0,
        }
    }
}

impl ResolvedStyle {
    /// The font-facing fields, for the measurement and shaping collaborators.
    pub fn font(&self) -> FontSpec {
        FontSpec {
            family: self.fontfamily.clone(),
            size: self.fontsize,
            weight: self.fontweight,
            style: self.fontstyle,
        }
    }

    /// Write one typed slot from a dynamic value.
    fn set(&mut self, prop: Prop, value: &StyleValue) -> Result<()> {
        let wrong = |expected: &str| {
            FlowError::config(format!(
                "property {:?} expects {expected}, got {value:?}",
                prop.canonical_name()
            ))
        };
        match (prop, value) {
            (Prop::Color, StyleValue::Str(s)) => self.color = s.clone(),
            (Prop::FontSize, StyleValue::Num(n)) => self.fontsize = *n,
            (Prop::FontWeight, StyleValue::Str(s)) => self.fontweight = s.parse()?,
            (Prop::FontWeight, StyleValue::Num(n)) => {
                self.fontweight = FontWeight::from_number(*n);
            }
            (Prop::FontFamily, StyleValue::Str(s)) => self.fontfamily = s.clone(),
            (Prop::FontStyle, StyleValue::Str(s)) => self.fontstyle = s.parse()?,
            (Prop::Underline, StyleValue::Bool(b)) => self.underline = *b,
            (Prop::BackgroundColor, StyleValue::Str(s)) => {
                self.backgroundcolor = Some(s.clone());
            }
            (Prop::Alpha, StyleValue::Num(n)) => self.alpha = *n,
            (Prop::Rotation, StyleValue::Num(n)) => self.rotation = *n,
            (Prop::Color | Prop::FontFamily | Prop::BackgroundColor, _) => {
                return Err(wrong("a string"));
            }
            (Prop::FontSize | Prop::Alpha | Prop::Rotation, _) => {
                return Err(wrong("a number"));
            }
            (Prop::FontWeight, _) => return Err(wrong("a name or number")),
            (Prop::FontStyle, _) => return Err(wrong("a name")),
            (Prop::Underline, _) => return Err(wrong("a boolean")),
        }
        Ok(())
    }
}

/// Collected per-property specifications, keyed by canonical property.
///
/// One property may be supplied through several entries (for example a
/// scalar `fontsize` plus a mapping `fontsizes`); same-shape entries merge
/// with the later one winning, while cross-shape precedence stays
/// mapping > scalar > sequence.
#[derive(Debug, Clone, Default)]
pub struct StyleSpecs {
    entries: Vec<(Prop, RawSpec)>,
}

impl StyleSpecs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a specification under a caller-supplied name (canonical, alias,
    /// or plural spelling).
    pub fn insert(&mut self, name: &str, spec: impl Into<RawSpec>) -> Result<()> {
        let prop = Prop::from_name(name)
            .ok_or_else(|| FlowError::config(format!("unrecognized property {name:?}")))?;
        self.entries.push((prop, spec.into()));
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: &str, spec: impl Into<RawSpec>) -> Result<Self> {
        self.insert(name, spec)?;
        Ok(self)
    }

    fn props(&self) -> Vec<Prop> {
        let mut seen = Vec::new();
        for (prop, _) in &self.entries {
            if !seen.contains(prop) {
                seen.push(*prop);
            }
        }
        seen
    }
}

/// Whole-record styling for chosen segments: index or index-set keys
/// mapped to partial property records.
#[derive(Debug, Clone, Default)]
pub struct StyleBundle {
    entries: Vec<(SpecKey, Vec<(Prop, StyleValue)>)>,
}

impl StyleBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add one record, translating aliases as it goes.
    pub fn insert(
        &mut self,
        key: impl Into<SpecKey>,
        record: Vec<(&str, StyleValue)>,
    ) -> Result<()> {
        let mut props = Vec::with_capacity(record.len());
        for (name, value) in record {
            let prop = Prop::from_name(name).ok_or_else(|| {
                FlowError::config(format!("unrecognized property {name:?} in style bundle"))
            })?;
            props.push((prop, value));
        }
        self.entries.push((key.into(), props));
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<SpecKey>, record: Vec<(&str, StyleValue)>) -> Result<Self> {
        self.insert(key, record)?;
        Ok(self)
    }

    /// Append every record of `other` after the existing entries.
    pub fn append(&mut self, other: StyleBundle) {
        self.entries.extend(other.entries);
    }

    /// Build a bundle from a raw mapping whose values are nested records,
    /// as produced by [`classify_map`] detection.
    pub fn from_raw(entries: &[(SpecKey, StyleValue)]) -> Result<Self> {
        let mut bundle = Self::new();
        for (key, value) in entries {
            let StyleValue::Map(record) = value else {
                return Err(FlowError::config(
                    "style bundle entries must be nested records",
                ));
            };
            let borrowed: Vec<(&str, StyleValue)> = record
                .iter()
                .map(|(name, v)| (name.as_str(), v.clone()))
                .collect();
            bundle.insert(key.clone(), borrowed)?;
        }
        Ok(bundle)
    }
}

/// Expand index-set keys of one mapping into per-index entries.
///
/// Rejects indices outside `[0, count)` and duplicate coverage of one
/// index within the mapping, which names the first offending index.
fn expand_keys<'a, T>(
    entries: impl Iterator<Item = (&'a SpecKey, T)>,
    count: usize,
    what: &str,
) -> Result<BTreeMap<usize, T>>
where
    T: Clone,
{
    let mut expanded: BTreeMap<usize, T> = BTreeMap::new();
    for (key, value) in entries {
        for &index in key.indices() {
            if index >= count {
                return Err(FlowError::IndexRange { index, count });
            }
            if expanded.insert(index, value.clone()).is_some() {
                return Err(FlowError::Conflict {
                    index,
                    detail: format!("index covered by more than one key in {what}"),
                });
            }
        }
    }
    Ok(expanded)
}

/// Per-property view of the middle priority tiers.
#[derive(Default)]
struct PropTiers<'a> {
    map: BTreeMap<usize, &'a StyleValue>,
    scalar: Option<&'a StyleValue>,
    sequence: Option<&'a [StyleValue]>,
}

/// Resolve every specification mechanism into one fully populated style
/// record per segment.
///
/// Pure function of its inputs; no component downstream may add or remove
/// segments, so the returned vector always has exactly `count` records.
pub fn normalize(
    count: usize,
    defaults: &ResolvedStyle,
    specs: &StyleSpecs,
    bundle: Option<&StyleBundle>,
) -> Result<Vec<ResolvedStyle>> {
    // Tier 1: expand the bundle to one partial record per covered index.
    let bundle_patches: BTreeMap<usize, &Vec<(Prop, StyleValue)>> = match bundle {
        Some(bundle) => expand_keys(
            bundle.entries.iter().map(|(k, v)| (k, v)),
            count,
            "style bundle",
        )?,
        None => BTreeMap::new(),
    };

    // Tiers 2-4: fold the per-property entries, later same-shape entries
    // winning, each mapping checked for overlap in isolation.
    let mut tiers: Vec<(Prop, PropTiers)> = Vec::new();
    for prop in specs.props() {
        let mut t = PropTiers::default();
        for (entry_prop, spec) in &specs.entries {
            if *entry_prop != prop {
                continue;
            }
            match spec {
                RawSpec::Scalar(value) => t.scalar = Some(value),
                RawSpec::Sequence(values) => {
                    if !values.is_empty() {
                        t.sequence = Some(values);
                    }
                }
                RawSpec::Map(entries) => {
                    let expanded = expand_keys(
                        entries.iter().map(|(k, v)| (k, v)),
                        count,
                        &format!("{:?} specification", prop.canonical_name()),
                    )?;
                    t.map.extend(expanded);
                }
            }
        }
        tiers.push((prop, t));
    }

    let mut resolved = Vec::with_capacity(count);
    for index in 0..count {
        let mut style = defaults.clone();

        // Low to high: sequence, scalar, mapping, then the bundle record.
        for (prop, t) in &tiers {
            if let Some(seq) = t.sequence {
                if let Some(value) = seq.get(index).or_else(|| seq.last()) {
                    style.set(*prop, value)?;
                }
            }
            if let Some(value) = t.scalar {
                style.set(*prop, value)?;
            }
            if let Some(value) = t.map.get(&index) {
                style.set(*prop, value)?;
            }
        }
        if let Some(record) = bundle_patches.get(&index) {
            for (prop, value) in record.iter() {
                style.set(*prop, value)?;
            }
        }

        resolved.push(style);
    }

    Ok(resolved)
}
