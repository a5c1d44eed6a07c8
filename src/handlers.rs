//! Terminal command handlers.
//!
//! Each input line is one user event (next, previous, indicator click, project
//! switch). Events are applied in arrival order and the resulting position is
//! printed together with the slide the renderer would play.

use std::io::Write;
use std::str::FromStr;
use std::time::Instant;

use case_study_gallery::catalog::Catalog;
use case_study_gallery::error::{AppError, Result};
use case_study_gallery::services::{CarouselService, CarouselUpdate};
use case_study_gallery::state::Direction;
use case_study_gallery::ui::{SlideFrame, TransitionController};

/// One user event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    GoTo(usize),
    Open(String),
    List,
    Quit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let command = match (parts.next(), parts.next()) {
            (Some("n" | "next"), None) => Command::Next,
            (Some("p" | "prev" | "previous"), None) => Command::Previous,
            (Some("g" | "goto"), Some(index)) => index
                .parse()
                .map(Command::GoTo)
                .map_err(|_| format!("not an index: {index}"))?,
            (Some("o" | "open"), Some(id)) => Command::Open(id.to_string()),
            (Some("l" | "list"), None) => Command::List,
            (Some("q" | "quit"), None) => Command::Quit,
            _ => return Err(format!("unknown command: {}", line.trim())),
        };
        if parts.next().is_some() {
            return Err(format!("too many arguments: {}", line.trim()));
        }
        Ok(command)
    }
}

/// Applies a command. Returns false when the session should end.
pub fn handle(
    command: Command,
    service: &CarouselService,
    catalog: &Catalog,
    transitions: &mut TransitionController,
    out: &mut impl Write,
) -> Result<bool> {
    let update = match command {
        Command::Quit => return Ok(false),
        Command::List => {
            for project in &catalog.projects {
                writeln!(
                    out,
                    "{:<28} {:<7} {}",
                    project.id, project.category, project.title
                )?;
            }
            return Ok(true);
        }
        Command::Open(id) => {
            let project = catalog
                .project(&id)
                .ok_or_else(|| AppError::Catalog(format!("no project '{id}'")))?;
            writeln!(out, "{} [{}] {}", project.title, project.category, project.client)?;
            service.open_project(project)
        }
        Command::Next | Command::Previous | Command::GoTo(_)
            if !service.layout().is_carousel() =>
        {
            writeln!(out, "showcase layout has no navigation")?;
            return Ok(true);
        }
        Command::Next => service.next(),
        Command::Previous => service.previous(),
        Command::GoTo(index) => service.go_to(index)?,
    };

    let now = Instant::now();
    transitions.apply(&update, now);
    render(service, &update, transitions.frame(now), out)?;
    Ok(true)
}

/// Prints the current image, indicator dots and the slide to play.
pub fn render(
    service: &CarouselService,
    update: &CarouselUpdate,
    frame: Option<SlideFrame>,
    out: &mut impl Write,
) -> Result<()> {
    if let Some(showcase) = service.showcase() {
        for (row, marquee) in showcase.rows.iter().enumerate() {
            writeln!(
                out,
                "row {} ({:?}): {} images",
                row + 1,
                marquee.direction,
                marquee.period()
            )?;
        }
        return Ok(());
    }

    let slide = describe_slide(frame);
    let arrow = match update.direction {
        Direction::None => ' ',
        Direction::Forward => '>',
        Direction::Backward => '<',
    };

    let dots: String = service
        .indicators()
        .into_iter()
        .map(|current| if current { '●' } else { '○' })
        .collect();

    writeln!(out, "{arrow} {} {}", dots, update.image)?;
    match service.load_current() {
        Ok(image) => writeln!(out, "  {}x{} {}", image.width, image.height, slide)?,
        Err(e) => writeln!(out, "  [placeholder] {}", e)?,
    }
    Ok(())
}

/// Words for the first frame of a slide.
fn describe_slide(frame: Option<SlideFrame>) -> String {
    match frame {
        Some(SlideFrame {
            outgoing: Some(outgoing),
            incoming_offset,
            ..
        }) => {
            let side = if incoming_offset < 0.0 { "left" } else { "right" };
            format!("slides in from the {side} over #{outgoing}")
        }
        _ => "appears".to_string(),
    }
}
