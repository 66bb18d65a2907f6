use fluid_clamp_protocol::ThemeToken;

/// Resolved RGBA color for egui rendering.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ResolvedColor {
    const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn visuals(self) -> egui::Visuals {
        match self {
            ThemeMode::Dark => dark_visuals(),
            ThemeMode::Light => light_visuals(),
        }
    }
}

pub fn resolve(token: ThemeToken, mode: ThemeMode) -> egui::Color32 {
    match mode {
        ThemeMode::Dark => resolve_dark(token),
        ThemeMode::Light => resolve_light(token),
    }
    .to_color32()
}

fn resolve_dark(token: ThemeToken) -> ResolvedColor {
    // Slate #4b4d68 accents on white text.
    use ThemeToken::*;
    match token {
        Background => ResolvedColor::rgb(0x1b, 0x1c, 0x2a),
        Surface => ResolvedColor::rgb(0x24, 0x25, 0x36),
        Border => ResolvedColor::rgb(0x4b, 0x4d, 0x68),

        TextPrimary => ResolvedColor::rgb(0xff, 0xff, 0xff),
        TextMuted => ResolvedColor::rgb(0x8a, 0x8d, 0xa8),

        GroupHeading => ResolvedColor::rgb(0xff, 0xff, 0xff),
        FieldLabel => ResolvedColor::rgb(0xc8, 0xca, 0xdc),
        FieldValue => ResolvedColor::rgb(0xff, 0xff, 0xff),
        FieldFocus => ResolvedColor::rgba(0x89, 0xb4, 0xfa, 80),
        UnitText => ResolvedColor::rgb(0x8a, 0x8d, 0xa8),

        OutputBorder => ResolvedColor::rgb(0x4b, 0x4d, 0x68),
        OutputText => ResolvedColor::rgb(0xff, 0xff, 0xff),
        CopyButton => ResolvedColor::rgb(0x4b, 0x4d, 0x68),
        CopyButtonText => ResolvedColor::rgb(0xff, 0xff, 0xff),

        StatusOk => ResolvedColor::rgb(0xa6, 0xe3, 0xa1),
        StatusError => ResolvedColor::rgb(0xf3, 0x8b, 0xa8),
    }
}

fn resolve_light(token: ThemeToken) -> ResolvedColor {
    use ThemeToken::*;
    match token {
        Background => ResolvedColor::rgb(255, 255, 255),
        Surface => ResolvedColor::rgb(245, 245, 248),
        Border => ResolvedColor::rgb(210, 210, 220),

        TextPrimary => ResolvedColor::rgb(20, 20, 30),
        TextMuted => ResolvedColor::rgb(100, 100, 110),

        GroupHeading => ResolvedColor::rgb(20, 20, 30),
        FieldLabel => ResolvedColor::rgb(80, 80, 100),
        FieldValue => ResolvedColor::rgb(20, 20, 30),
        FieldFocus => ResolvedColor::rgba(50, 110, 220, 50),
        UnitText => ResolvedColor::rgb(100, 100, 110),

        OutputBorder => ResolvedColor::rgb(180, 182, 200),
        OutputText => ResolvedColor::rgb(20, 20, 30),
        CopyButton => ResolvedColor::rgb(75, 77, 104),
        CopyButtonText => ResolvedColor::rgb(255, 255, 255),

        StatusOk => ResolvedColor::rgb(56, 142, 60),
        StatusError => ResolvedColor::rgb(211, 47, 47),
    }
}

// ── Typography scale ───────────────────────────────────────────────────────

pub const FONT_TITLE: f32 = 20.0;
pub const FONT_BODY: f32 = 14.0;
pub const FONT_CAPTION: f32 = 12.0;
pub const FONT_RESULT: f32 = 15.0;

// ── egui visual presets ────────────────────────────────────────────────────

fn dark_visuals() -> egui::Visuals {
    let mut v = egui::Visuals::dark();
    v.panel_fill = resolve(ThemeToken::Background, ThemeMode::Dark);
    v.window_fill = resolve(ThemeToken::Surface, ThemeMode::Dark);
    v.extreme_bg_color = resolve(ThemeToken::Surface, ThemeMode::Dark);
    v.widgets.noninteractive.bg_stroke =
        egui::Stroke::new(1.0, resolve(ThemeToken::Border, ThemeMode::Dark));
    v.widgets.inactive.weak_bg_fill = resolve(ThemeToken::CopyButton, ThemeMode::Dark);
    v.selection.bg_fill = resolve(ThemeToken::FieldFocus, ThemeMode::Dark);
    v.widgets.noninteractive.corner_radius = egui::CornerRadius::same(5);
    v.widgets.inactive.corner_radius = egui::CornerRadius::same(5);
    v.widgets.hovered.corner_radius = egui::CornerRadius::same(5);
    v.widgets.active.corner_radius = egui::CornerRadius::same(5);
    v
}

fn light_visuals() -> egui::Visuals {
    let mut v = egui::Visuals::light();
    v.panel_fill = resolve(ThemeToken::Background, ThemeMode::Light);
    v.window_fill = resolve(ThemeToken::Surface, ThemeMode::Light);
    v.widgets.noninteractive.bg_stroke =
        egui::Stroke::new(1.0, resolve(ThemeToken::Border, ThemeMode::Light));
    v.selection.bg_fill = resolve(ThemeToken::FieldFocus, ThemeMode::Light);
    v.widgets.noninteractive.corner_radius = egui::CornerRadius::same(5);
    v.widgets.inactive.corner_radius = egui::CornerRadius::same(5);
    v.widgets.hovered.corner_radius = egui::CornerRadius::same(5);
    v.widgets.active.corner_radius = egui::CornerRadius::same(5);
    v
}

/// Apply the form's typography scale to egui styles.
pub fn apply_typography(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.text_styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::proportional(FONT_TITLE),
    );
    style
        .text_styles
        .insert(egui::TextStyle::Body, egui::FontId::proportional(FONT_BODY));
    style.text_styles.insert(
        egui::TextStyle::Button,
        egui::FontId::proportional(FONT_BODY),
    );
    style.text_styles.insert(
        egui::TextStyle::Small,
        egui::FontId::proportional(FONT_CAPTION),
    );
    style.text_styles.insert(
        egui::TextStyle::Monospace,
        egui::FontId::monospace(FONT_RESULT),
    );
    style.spacing.item_spacing = egui::vec2(8.0, 8.0);
    style.spacing.button_padding = egui::vec2(10.0, 4.0);
    ctx.set_style(style);
}
