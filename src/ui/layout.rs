use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct BrowseLayout {
    pub tabs_area: Rect,
    pub search_area: Rect,
    pub list_area: Rect,
    pub preview_area: Rect,
    pub status_area: Rect,
    pub help_area: Rect,
}

pub struct EditorLayout {
    pub title_area: Rect,
    pub body_area: Rect,
    pub status_area: Rect,
    pub help_area: Rect,
}

pub struct StudyLayout {
    pub header_area: Rect,
    pub question_area: Rect,
    pub answer_area: Rect,
    pub help_area: Rect,
}

pub struct SummaryLayout {
    pub header_area: Rect,
    pub content_area: Rect,
    pub footer_area: Rect,
}

pub fn calculate_browse_chunks(area: Rect) -> BrowseLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(4),
        ])
        .split(area);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[2]);

    BrowseLayout {
        tabs_area: chunks[0],
        search_area: chunks[1],
        list_area: body[0],
        preview_area: body[1],
        status_area: chunks[3],
        help_area: chunks[4],
    }
}

pub fn calculate_editor_chunks(area: Rect) -> EditorLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    EditorLayout {
        title_area: chunks[0],
        body_area: chunks[1],
        status_area: chunks[2],
        help_area: chunks[3],
    }
}

pub fn calculate_study_chunks(area: Rect) -> StudyLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Percentage(60),
            Constraint::Length(3),
        ])
        .split(area);

    StudyLayout {
        header_area: chunks[0],
        question_area: chunks[1],
        answer_area: chunks[2],
        help_area: chunks[3],
    }
}

pub fn calculate_summary_chunks(area: Rect) -> SummaryLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    SummaryLayout {
        header_area: chunks[0],
        content_area: chunks[1],
        footer_area: chunks[2],
    }
}

/// Popup area centered in `area`, sized as a percentage of it.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
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
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browse_layout() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = calculate_browse_chunks(area);

        assert_eq!(layout.tabs_area.height, 3);
        assert_eq!(layout.search_area.height, 1);
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.help_area.height, 4);
        // margin 1 leaves 38 rows, fixed rows take 9
        assert_eq!(layout.list_area.height, 29);
        assert_eq!(layout.list_area.height, layout.preview_area.height);
        assert!(layout.list_area.width < layout.preview_area.width);
    }

    #[test]
    fn test_editor_layout() {
        let area = Rect::new(0, 0, 80, 30);
        let layout = calculate_editor_chunks(area);

        assert_eq!(layout.title_area.height, 3);
        assert_eq!(layout.help_area.height, 3);
        assert_eq!(layout.body_area.height, 28 - 7);
    }

    #[test]
    fn test_study_layout() {
        let area = Rect::new(0, 0, 100, 100);
        let layout = calculate_study_chunks(area);

        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.help_area.height, 3);
        assert!(layout.question_area.height >= 3);
        assert!(layout.answer_area.height > 0);
    }

    #[test]
    fn test_summary_layout() {
        let area = Rect::new(0, 0, 100, 100);
        let layout = calculate_summary_chunks(area);

        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.footer_area.height, 3);
        assert_eq!(layout.content_area.height, 92);
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 40, area);

        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 20);
        assert_eq!(popup.x, 20);
        assert_eq!(popup.y, 15);
    }
}
