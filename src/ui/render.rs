//! 界面渲染
//!
//! 根据 UiState（phase、history、results、notice、error）与 input_buffer 绘制：
//! 标题栏显示 phase，主体为对话历史或搜索结果（条目间分隔线、按宽度换行），
//! 中部一行模式单选器，底部为输入框与快捷键提示；错误显示在输入框标题并红框。

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
    Frame,
};

use crate::config::AppSection;
use crate::core::{Mode, SessionPhase, UiState};
use crate::memory::ConversationTurn;
use crate::search::SearchResult;

/// 单条内容在 UI 中显示的最大字符数；过长的 bot 回复或摘要折叠，避免刷屏
const MAX_DISPLAY_CHARS: usize = 600;

/// 对过长内容做折叠：保留前 N 字 + 省略提示，便于阅读
fn truncate_for_display(content: &str) -> String {
    let chars: Vec<char> = content.chars().collect();
    if chars.len() <= MAX_DISPLAY_CHARS {
        return content.to_string();
    }
    let head: String = chars.iter().take(MAX_DISPLAY_CHARS).collect();
    format!("{}\n... [内容已省略，共 {} 字]", head, chars.len())
}

/// 将内容按宽度换行，支持 UTF-8（按字符数，避免在 UTF-8 中间截断）
fn wrap_text(s: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![s.to_string()];
    }
    let mut lines = Vec::new();
    for para in s.split('\n') {
        let mut line = String::new();
        for ch in para.chars() {
            if line.chars().count() >= width {
                lines.push(std::mem::take(&mut line));
            }
            line.push(ch);
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// 条目之间的分隔线
fn divider(width: usize) -> Line<'static> {
    Line::from(Span::styled(
        "─".repeat(width.max(4)),
        Style::default().fg(Color::DarkGray),
    ))
}

/// 带前缀的段落：首行加彩色前缀，折行缩进对齐
fn push_prefixed(
    lines: &mut Vec<Line<'static>>,
    prefix: &'static str,
    color: Color,
    content: &str,
    width: usize,
) {
    let display = truncate_for_display(content);
    for (i, line) in wrap_text(&display, width.max(40)).into_iter().enumerate() {
        let pref = if i == 0 { prefix } else { "        " };
        lines.push(Line::from(vec![
            Span::styled(pref, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::raw(line),
        ]));
    }
}

/// 对话历史：标题 + 每轮 You💜/Bot🤖，轮次之间分隔线
fn push_history(lines: &mut Vec<Line<'static>>, history: &[ConversationTurn], width: usize) {
    lines.push(Line::from(Span::styled(
        "Conversation History",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for turn in history {
        lines.push(divider(width));
        push_prefixed(lines, "You💜: ", Color::Cyan, &turn.user, width);
        push_prefixed(lines, "Bot🤖: ", Color::Green, &turn.bot, width);
    }
}

/// 搜索结果：标题 + 逐条「序号. 标题 / 摘要 / 链接」，条目之间分隔线
fn push_results(lines: &mut Vec<Line<'static>>, results: &[SearchResult], width: usize) {
    lines.push(Line::from(Span::styled(
        "Tavily Search Results",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for (i, result) in results.iter().enumerate() {
        lines.push(divider(width));
        let heading = format!("{}. {}", i + 1, result.title);
        for line in wrap_text(&heading, width.max(40)) {
            lines.push(Line::from(Span::styled(
                line,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )));
        }
        for line in wrap_text(&truncate_for_display(&result.snippet), width.max(40)) {
            lines.push(Line::from(Span::raw(line)));
        }
        lines.push(Line::from(Span::styled(
            format!("Link: {}", result.url),
            Style::default().fg(Color::Blue),
        )));
    }
}

/// 模式单选器中的一项
fn mode_span(mode: Mode, current: Mode) -> Span<'static> {
    let marker = if mode == current { "◉" } else { "○" };
    let style = if mode == current {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    Span::styled(format!("{} {}", marker, mode.label()), style)
}

/// 绘制一帧：上方内容区（标题 + 历史或结果 + 滚动条），中部模式行，下方输入区；
/// 将 (总行数, 可视高度) 写入 out 供外部 clamp 滚动
pub fn draw(
    f: &mut Frame,
    state: &UiState,
    input_buffer: &str,
    mode: Mode,
    conversation_scroll: usize,
    out: &mut (usize, usize),
    app: &AppSection,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(f.area());

    let conv_area = chunks[0];
    let content_width = conv_area.width.saturating_sub(2).saturating_sub(1) as usize; // 边框 + 滚动条

    let phase_str = match &state.phase {
        SessionPhase::Idle => "空闲".to_string(),
        SessionPhase::Processing(Mode::Chat) => "Gemini 思考中…".to_string(),
        SessionPhase::Processing(Mode::Search) => "Tavily 搜索中…".to_string(),
        SessionPhase::Error => "错误".to_string(),
    };

    let title = format!(" {} │ {} ", app.title, phase_str);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    // 内容选择：提示 > 搜索结果 > 对话历史 > 副标题占位
    let mut text_lines: Vec<Line> = Vec::new();
    if let Some(notice) = &state.notice {
        text_lines.push(Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(Color::Yellow),
        )));
    } else if !state.results.is_empty() {
        push_results(&mut text_lines, &state.results, content_width);
    } else if !state.history.is_empty() {
        push_history(&mut text_lines, &state.history, content_width);
    } else {
        text_lines.push(Line::from(Span::styled(
            app.subtitle.clone(),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let content_height = conv_area.height.saturating_sub(2) as usize; // 边框
    let total_lines = text_lines.len();
    let max_scroll = total_lines.saturating_sub(content_height);
    let scroll_offset = conversation_scroll.min(max_scroll);

    let paragraph = Paragraph::new(Text::from(text_lines))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll_offset as u16, 0));
    f.render_widget(paragraph, conv_area);

    if total_lines > content_height {
        let mut scrollbar_state = ScrollbarState::new(total_lines)
            .position(scroll_offset)
            .viewport_content_length(content_height);
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .thumb_symbol("█")
            .track_symbol(Some("░"));
        f.render_stateful_widget(scrollbar, conv_area, &mut scrollbar_state);
    }

    // 模式单选器（原地切换，不重置输入）
    let mode_line = Line::from(vec![
        Span::styled(" 模式: ", Style::default().fg(Color::DarkGray)),
        mode_span(Mode::Chat, mode),
        Span::raw("   "),
        mode_span(Mode::Search, mode),
        Span::styled("   (Tab 切换)", Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(mode_line), chunks[1]);

    let input_prompt = if let Some(err) = &state.error_message {
        format!(" 错误: {} ", err.chars().take(48).collect::<String>())
    } else if state.input_locked {
        " 等待回复… ".to_string()
    } else {
        " You💜: ".to_string()
    };

    let border_color = if state.error_message.is_some() {
        Color::Red
    } else {
        Color::Blue
    };

    let hint = " Enter 发送 │ Tab 切换模式 │ ↑↓ PgUp/PgDn 滚动 │ Ctrl+L 清空 │ Ctrl+Q 退出 ";
    let input_block = Block::default()
        .title(input_prompt)
        .title_bottom(Line::from(Span::styled(
            hint,
            Style::default().fg(Color::DarkGray),
        )))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    let input = Paragraph::new(input_buffer)
        .block(input_block)
        .wrap(Wrap { trim: false })
        .style(if state.input_locked {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        });

    f.render_widget(input, chunks[2]);

    out.0 = total_lines;
    out.1 = content_height;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_text_splits_by_char_width() {
        let lines = wrap_text("abcdef", 3);
        assert_eq!(lines, vec!["abc", "def"]);
    }

    #[test]
    fn test_wrap_text_keeps_short_lines() {
        let lines = wrap_text("你好\nworld", 10);
        assert_eq!(lines, vec!["你好", "world"]);
    }

    #[test]
    fn test_truncate_keeps_short_content() {
        assert_eq!(truncate_for_display("short"), "short");
    }

    #[test]
    fn test_truncate_folds_long_content() {
        let long: String = "x".repeat(1000);
        let folded = truncate_for_display(&long);
        assert!(folded.contains("已省略"));
        assert!(folded.chars().count() < 700);
    }
}
