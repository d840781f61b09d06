use crate::app::{AppState, Input, ServiceStatus, Submission};
use pima_form::{
    ComparisonBar, FormPhase, PatientField, Tone, indicator_cells, preset_matching,
};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph, Wrap},
};

const INDICATOR_WIDTH: u16 = 40;

// --- Color Helpers ---
fn tone_color(tone: Tone) -> Color {
    tone.hex().parse().unwrap_or(Color::White)
}

fn field_hint(field: PatientField) -> &'static str {
    match field {
        PatientField::Pregnancies => "Pregnancies (0-20)",
        PatientField::Glucose => "Glucose (mg/dL, 1-250)",
        PatientField::BloodPressure => "Blood pressure (mm Hg, 1-200)",
        PatientField::SkinThickness => "Skin fold thickness",
        PatientField::Insulin => "Insulin (μU/mL, 0-900)",
        PatientField::Bmi => "BMI (kg/m², 0.1-70)",
        PatientField::DiabetesPedigreeFunction => "Family history of diabetes",
        PatientField::Age => "Age (years, 18-99)",
    }
}

pub fn render(state: &AppState, frame: &mut Frame) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(10),   // Body
            Constraint::Length(1), // Key hints
        ])
        .split(frame.size());

    HeaderView::render(frame, layout[0], &state.service);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(layout[1]);

    FormView::render(frame, body[0], state);
    match &state.submission {
        Some(submission) => ResultView::render(frame, body[1], state, submission),
        None => {
            let placeholder = Paragraph::new("Fill in the form to get a prediction")
                .block(Block::default().borders(Borders::ALL).title(" Prediction "))
                .style(Style::default().fg(Color::Gray));
            frame.render_widget(placeholder, body[1]);
        }
    }

    let hints = Paragraph::new(
        " Tab/↑↓ move  ←→ preset  Enter predict  r reset  ? help  q quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(hints, layout[2]);

    if state.show_help {
        render_popup(frame, " Help ", HELP_TEXT, Color::Cyan);
    }
    if let Some(alert) = &state.alert {
        render_popup(frame, " Error ", &format!("{alert}\n\nPress Enter to close."), Color::Red);
    }
}

// --- HeaderView ---
pub struct HeaderView;

impl HeaderView {
    pub fn render(frame: &mut Frame, area: Rect, service: &ServiceStatus) {
        let (text, color) = match service {
            ServiceStatus::Unknown => ("not checked".to_string(), Color::Gray),
            ServiceStatus::Online(message) => (format!("online ({message})"), Color::Green),
            ServiceStatus::Offline => ("unreachable".to_string(), Color::Red),
        };
        let content = Line::from(vec![
            Span::styled(
                " Diabetes prediction from patient data ",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | Service: "),
            Span::styled(text, Style::default().fg(color)),
        ]);
        let paragraph = Paragraph::new(content).block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(paragraph, area);
    }
}

// --- FormView ---
pub struct FormView;

impl FormView {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(8)])
            .split(area);

        Self::render_calculator(frame, layout[0], state);
        Self::render_fields(frame, layout[1], state);
    }

    fn input_line(state: &AppState, input: Input, label: &str, value: Span<'static>) -> Line<'static> {
        let focused = state.focused() == input;
        let marker = if focused { "▶ " } else { "  " };
        let label_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(format!("{marker}{label}: "), label_style),
            value,
        ])
    }

    fn render_calculator(frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default().borders(Borders::ALL).title(" BMI calculator ");
        let mut lines = vec![
            Self::input_line(state, Input::Height, "Height (cm)", Span::raw(state.buffer(Input::Height).to_string())),
            Self::input_line(state, Input::Weight, "Weight (kg)", Span::raw(state.buffer(Input::Weight).to_string())),
        ];

        let bands = &state.form.tables().bmi_bands;
        if let Some(band) = state.form.bmi_band() {
            let style = Style::default().fg(tone_color(band.tone));
            lines.push(Line::from(vec![
                Span::styled(format!("  {}", band.label), style.add_modifier(Modifier::BOLD)),
                Span::styled(format!("  BMI: {:.1}", state.form.record().bmi), style),
                Span::styled(
                    format!("  WHO: {}", band.range_text(bands.is_last(band))),
                    Style::default().fg(Color::Gray),
                ),
            ]));
        }

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_fields(frame: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default().borders(Borders::ALL).title(" Patient data ");
        let form = &state.form;
        let mut lines = Vec::new();

        for field in PatientField::ALL {
            let input = Input::Field(field);
            let value = if field.is_preset() {
                let value = form.record().get(field);
                let label = preset_matching(field, value).map(|p| p.label).unwrap_or("custom");
                Span::styled(format!("◀ {label} ▶"), Style::default().fg(Color::White))
            } else {
                Span::raw(state.buffer(input).to_string())
            };
            lines.push(Self::input_line(state, input, field_hint(field), value));

            if let Some(preset) = preset_matching(field, form.record().get(field)) {
                lines.push(Line::styled(
                    format!("    {}", preset.description),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            if let Some(message) = form.errors().get(field) {
                lines.push(Line::styled(format!("    {message}"), Style::default().fg(Color::Red)));
            }
        }

        lines.push(Line::raw(""));
        let submit = match form.phase() {
            FormPhase::Submitting => Span::styled(
                "  Analyzing...",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            FormPhase::Editing if form.can_submit() => Span::styled(
                "  [Enter] Run prediction",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            FormPhase::Editing => Span::styled(
                "  [Enter] Run prediction (fix the fields above first)",
                Style::default().fg(Color::DarkGray),
            ),
        };
        lines.push(Line::from(vec![submit, Span::raw("   [r] Reset")]));

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

// --- ResultView ---
pub struct ResultView;

impl ResultView {
    pub fn render(frame: &mut Frame, area: Rect, state: &AppState, submission: &Submission) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(7), Constraint::Min(8)])
            .split(area);

        Self::render_summary(frame, layout[0], state, submission);
        ComparisonView::render(frame, layout[1], &state.form.tables().references.compare(&submission.record));
    }

    fn render_summary(frame: &mut Frame, area: Rect, state: &AppState, submission: &Submission) {
        let result = &submission.result;
        let risk = state.form.tables().risk.classify(result.probability);
        let color = tone_color(risk.tone);
        let headline_color = if result.prediction == pima_form::Classification::Diabetes {
            Color::Red
        } else {
            Color::Green
        };

        let filled = indicator_cells(result.probability, INDICATOR_WIDTH);
        let bar = Line::from(vec![
            Span::styled("█".repeat(filled as usize), Style::default().fg(color)),
            Span::styled(
                "░".repeat((INDICATOR_WIDTH - filled) as usize),
                Style::default().fg(Color::DarkGray),
            ),
        ]);

        let lines = vec![
            Line::styled(
                result.prediction.headline(),
                Style::default().fg(headline_color).add_modifier(Modifier::BOLD),
            ),
            Line::from(vec![
                Span::raw("Probability: "),
                Span::styled(
                    format!("{}%", result.probability_percent()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            bar,
            Line::from(vec![
                Span::raw("Risk: "),
                Span::styled(risk.level.label(), Style::default().fg(color).add_modifier(Modifier::BOLD)),
            ]),
        ];

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Prediction "));
        frame.render_widget(paragraph, area);
    }
}

// --- ComparisonView ---
pub struct ComparisonView;

impl ComparisonView {
    pub fn render(frame: &mut Frame, area: Rect, bars: &[ComparisonBar]) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Reference ranges ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(6), Constraint::Length(bars.len() as u16 + 1)])
            .split(inner);

        let mut chart = BarChart::default().bar_width(2).bar_gap(0).group_gap(2);
        for bar in bars {
            chart = chart.data(Self::group(bar));
        }
        frame.render_widget(chart, layout[0]);

        let mut lines = vec![Line::styled(
            "value / min / optimum / max",
            Style::default().fg(Color::DarkGray),
        )];
        lines.extend(bars.iter().map(|bar| {
            Line::from(vec![
                Span::raw(format!("{:<10}", bar.label)),
                Span::styled(format!("{:>7.1} ", bar.value), Style::default().fg(tone_color(bar.tone))),
                Span::styled(
                    format!("[{} | {} | {}] {} ", bar.min, bar.optimal, bar.max, bar.unit),
                    Style::default().fg(Color::Gray),
                ),
                Span::styled(bar.status.label(), Style::default().fg(tone_color(bar.tone))),
            ])
        }));
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), layout[1]);
    }

    // Bar heights are in tenths so one decimal survives the integer scale.
    fn group(bar: &ComparisonBar) -> BarGroup<'static> {
        let scaled = |value: f64| (value.max(0.0) * 10.0).round() as u64;
        let series = [
            (bar.value, tone_color(bar.tone)),
            (bar.min, Color::Rgb(203, 213, 225)),
            (bar.optimal, Color::Rgb(148, 163, 184)),
            (bar.max, Color::Rgb(100, 116, 139)),
        ];
        let bars: Vec<Bar<'static>> = series
            .iter()
            .map(|(value, color)| {
                Bar::default()
                    .value(scaled(*value))
                    .text_value(String::new())
                    .style(Style::default().fg(*color))
            })
            .collect();
        BarGroup::default()
            .label(Line::from(bar.label))
            .bars(&bars)
    }
}

const HELP_TEXT: &str = "Tab / Down   next input\n\
Shift-Tab / Up   previous input\n\
Left / Right   choose a preset\n\
0-9 . -   type a value, Backspace deletes\n\
Enter   run the prediction\n\
r   reset the patient data (the calculator keeps its values)\n\
?   toggle this help\n\
q / Ctrl-C   quit";

fn render_popup(frame: &mut Frame, title: &str, text: &str, color: Color) {
    let area = centered_rect(60, 40, frame.size());
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .style(Style::default().fg(color));
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(text.to_string()).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
