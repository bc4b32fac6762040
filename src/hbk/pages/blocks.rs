//! Structured block extraction from documentation HTML pages.
//!
//! A page is a flat run of body-level elements; labeled headings split
//! it into titled blocks (Name, Syntax, Parameters, Description, ...).
//! Two selector sets exist: legacy pages mark titles with heading tags
//! or `head`/`title` classes, modern pages (8.3.27+) with the
//! `V8SH_heading` / `V8SH_chapter` / `V8SH_pagetitle` classes. The set
//! is chosen by first-match detection on the page itself.
//!
//! Extraction is a single pass over a tolerant markup event stream.
//! Tables flatten to ` | `-joined rows, list items to `- ` bullets,
//! block elements to newlines.

use quick_xml::events::Event;
use quick_xml::Reader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Name,
    Syntax,
    Parameters,
    Description,
    ReturnValue,
    Value,
    Example,
    Availability,
    Note,
    SeeAlso,
    Constructors,
    Methods,
    Properties,
    CollectionElements,
    Unknown,
}

impl BlockKind {
    /// Map a block title (Russian or English) to its kind.
    pub fn from_title(title: &str) -> Option<BlockKind> {
        let title = title.trim().trim_end_matches(':').trim();

        if title.starts_with("Вариант синтаксиса") || title.starts_with("Syntax variant")
        {
            return Some(BlockKind::Syntax);
        }

        let kind = match title {
            "Имя" | "Name" => BlockKind::Name,
            "Синтаксис" | "Syntax" => BlockKind::Syntax,
            "Параметры" | "Parameters" => BlockKind::Parameters,
            "Описание" | "Description" => BlockKind::Description,
            "Возвращаемое значение" | "Return value" => BlockKind::ReturnValue,
            "Значение" | "Value" => BlockKind::Value,
            "Пример" | "Example" => BlockKind::Example,
            "Доступность" | "Availability" | "Использование" | "Use" => {
                BlockKind::Availability
            }
            "Замечание" | "Note" => BlockKind::Note,
            "См. также" | "See also" => BlockKind::SeeAlso,
            "Конструкторы" | "Constructors" => BlockKind::Constructors,
            "Методы" | "Methods" => BlockKind::Methods,
            "Свойства" | "Properties" => BlockKind::Properties,
            "Элементы коллекции" | "Элемент коллекции" | "Collection elements"
            | "Collection element" => BlockKind::CollectionElements,
            _ => return None,
        };
        Some(kind)
    }
}

#[derive(Debug, Clone)]
pub struct ParsedBlock {
    pub title: String,
    pub kind: BlockKind,
    pub content: String,
}

#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    pub title: String,
    pub blocks: Vec<ParsedBlock>,
}

impl ParsedPage {
    pub fn block(&self, kind: BlockKind) -> Option<&ParsedBlock> {
        self.blocks.iter().find(|b| b.kind == kind)
    }

    pub fn block_content(&self, kind: BlockKind) -> &str {
        self.block(kind).map(|b| b.content.as_str()).unwrap_or("")
    }
}

/// Parse an HTML documentation page into titled blocks.
pub fn parse_html_page(html: &str) -> ParsedPage {
    let (title, elements) = collect_elements(html);
    let modern = elements.iter().any(|e| e.class.contains("V8SH_"));

    let mut page = ParsedPage {
        title,
        ..Default::default()
    };
    let mut current: Option<ParsedBlock> = None;
    let mut parts: Vec<String> = Vec::new();

    let finalize =
        |current: &mut Option<ParsedBlock>, parts: &mut Vec<String>, page: &mut ParsedPage| {
            if let Some(mut block) = current.take() {
                block.content = parts.join("\n").trim().to_string();
                page.blocks.push(block);
            }
            parts.clear();
        };

    for element in &elements {
        if element.text.is_empty() {
            continue;
        }

        // The modern page title doubles as the bilingual name line.
        if element.class.contains("V8SH_pagetitle") {
            finalize(&mut current, &mut parts, &mut page);
            if page.title.is_empty() {
                page.title = element.text.clone();
            }
            page.blocks.push(ParsedBlock {
                title: element.text.clone(),
                kind: BlockKind::Name,
                content: element.text.clone(),
            });
            continue;
        }

        match detect_block_title(element, modern) {
            Some(kind) => {
                finalize(&mut current, &mut parts, &mut page);
                current = Some(ParsedBlock {
                    title: element.text.clone(),
                    kind,
                    content: String::new(),
                });
            }
            None => parts.push(element.text.clone()),
        }
    }

    if current.is_some() {
        finalize(&mut current, &mut parts, &mut page);
    } else if page.blocks.is_empty() && !parts.is_empty() {
        // No labeled sections at all: the whole page is a description
        page.blocks.push(ParsedBlock {
            title: "Описание".to_string(),
            kind: BlockKind::Description,
            content: parts.join("\n").trim().to_string(),
        });
    }

    page
}

fn detect_block_title(element: &RawElement, modern: bool) -> Option<BlockKind> {
    let text = element.text.as_str();

    if matches!(element.tag.as_str(), "h1" | "h2" | "h3" | "h4") {
        return Some(BlockKind::from_title(text).unwrap_or(BlockKind::Unknown));
    }

    if element.tag == "p" {
        let class_hit = if modern {
            element.class.contains("V8SH_heading") || element.class.contains("V8SH_chapter")
        } else {
            element.class.contains("head") || element.class.contains("title")
        };
        if class_hit {
            return Some(BlockKind::from_title(text).unwrap_or(BlockKind::Unknown));
        }
    }

    // A paragraph that is nothing but bold text and names a known block
    if matches!(element.tag.as_str(), "p" | "div") && element.all_bold {
        return BlockKind::from_title(text);
    }

    None
}

/// One body-level element with its flattened text
struct RawElement {
    tag: String,
    class: String,
    text: String,
    all_bold: bool,
}

struct ElementAcc {
    tag: String,
    class: String,
    buf: String,
    bold_depth: usize,
    has_text: bool,
    all_bold: bool,
    row_has_cell: bool,
}

impl ElementAcc {
    fn new(tag: String, class: String) -> Self {
        Self {
            tag,
            class,
            buf: String::new(),
            bold_depth: 0,
            has_text: false,
            all_bold: true,
            row_has_cell: false,
        }
    }

    fn on_child_start(&mut self, tag: &str) {
        match tag {
            "b" | "strong" => self.bold_depth += 1,
            "li" => {
                self.newline();
                self.buf.push_str("- ");
            }
            "tr" => {
                self.newline();
                self.row_has_cell = false;
            }
            "td" | "th" => {
                if self.row_has_cell {
                    self.buf.push_str(" | ");
                }
                self.row_has_cell = true;
            }
            "p" | "div" | "table" | "ul" | "ol" | "pre" | "h1" | "h2" | "h3" | "h4" => {
                self.newline()
            }
            _ => {}
        }
    }

    fn on_child_end(&mut self, tag: &str) {
        if matches!(tag, "b" | "strong") {
            self.bold_depth = self.bold_depth.saturating_sub(1);
        }
    }

    fn push_text(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if self.bold_depth == 0 {
            self.all_bold = false;
        }
        self.has_text = true;
        if !self.buf.is_empty() && !self.buf.ends_with([' ', '\n']) {
            self.buf.push(' ');
        }
        self.buf.push_str(text);
    }

    fn newline(&mut self) {
        if !self.buf.is_empty() && !self.buf.ends_with('\n') {
            self.buf.push('\n');
        }
    }

    fn finish(self) -> RawElement {
        let text = self
            .buf
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        RawElement {
            tag: self.tag,
            class: self.class,
            all_bold: self.has_text && self.all_bold,
            text,
        }
    }
}

const VOID_TAGS: &[&str] = &["br", "hr", "img", "meta", "link", "input", "col", "area"];

fn collect_elements(html: &str) -> (String, Vec<RawElement>) {
    let mut reader = Reader::from_str(html);
    reader.check_end_names(false);

    let mut page_title = String::new();
    let mut elements: Vec<RawElement> = Vec::new();
    let mut current: Option<ElementAcc> = None;
    let mut element_depth = 0usize;
    let mut in_title = false;
    let mut in_body = false;
    let mut skip_tag: Option<(String, usize)> = None;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("HTML parse stopped early: {}", e);
                break;
            }
        };

        match event {
            Event::Start(ref e) => {
                let tag = tag_name(e.local_name().as_ref());

                if let Some((skipped, depth)) = skip_tag.as_mut() {
                    if tag == *skipped {
                        *depth += 1;
                    }
                    continue;
                }
                if matches!(tag.as_str(), "script" | "style") {
                    skip_tag = Some((tag, 1));
                    continue;
                }

                if VOID_TAGS.contains(&tag.as_str()) {
                    if tag == "br" {
                        if let Some(acc) = current.as_mut() {
                            acc.newline();
                        }
                    }
                    continue;
                }

                match tag.as_str() {
                    "title" => in_title = true,
                    "body" => in_body = true,
                    _ if in_body => match current.as_mut() {
                        Some(acc) => {
                            element_depth += 1;
                            acc.on_child_start(&tag);
                        }
                        None => {
                            current = Some(ElementAcc::new(tag, class_attr(e)));
                            element_depth = 1;
                        }
                    },
                    _ => {}
                }
            }
            Event::Empty(ref e) => {
                let tag = tag_name(e.local_name().as_ref());
                if skip_tag.is_some() {
                    continue;
                }
                if tag == "br" {
                    if let Some(acc) = current.as_mut() {
                        acc.newline();
                    }
                }
            }
            Event::End(ref e) => {
                let tag = tag_name(e.local_name().as_ref());

                if skip_tag.is_some() {
                    let mut finished = false;
                    if let Some((skipped, depth)) = skip_tag.as_mut() {
                        if tag == *skipped {
                            *depth -= 1;
                            finished = *depth == 0;
                        }
                    }
                    if finished {
                        skip_tag = None;
                    }
                    continue;
                }

                // Void elements never opened a level
                if VOID_TAGS.contains(&tag.as_str()) {
                    continue;
                }

                match tag.as_str() {
                    "title" => in_title = false,
                    "body" => {
                        if let Some(acc) = current.take() {
                            elements.push(acc.finish());
                        }
                        in_body = false;
                    }
                    _ if in_body && current.is_some() => {
                        element_depth -= 1;
                        if element_depth == 0 {
                            if let Some(acc) = current.take() {
                                elements.push(acc.finish());
                            }
                        } else if let Some(acc) = current.as_mut() {
                            acc.on_child_end(&tag);
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(ref e) => {
                let text = match e.unescape() {
                    Ok(cow) => cow.into_owned(),
                    Err(_) => decode_entities(&String::from_utf8_lossy(e.as_ref())),
                };
                if skip_tag.is_some() {
                    continue;
                }
                if in_title {
                    page_title.push_str(text.trim());
                } else if let Some(acc) = current.as_mut() {
                    acc.push_text(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    (page_title, elements)
}

fn tag_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw).to_lowercase()
}

fn class_attr(e: &quick_xml::events::BytesStart<'_>) -> String {
    for attr in e.attributes().flatten() {
        if attr.key.local_name().as_ref() == b"class" {
            return String::from_utf8_lossy(&attr.value).into_owned();
        }
    }
    String::new()
}

/// Entity cleanup for text the strict unescaper rejected.
fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEGACY_METHOD_PAGE: &str = r#"<html>
<head><title>Добавить</title></head>
<body>
<h1>Имя</h1>
<p>Добавить (Add)</p>
<h1>Синтаксис</h1>
<pre>Добавить(&lt;Значение&gt;)</pre>
<h1>Параметры</h1>
<p>&lt;Значение&gt; - Добавляемое значение.</p>
<h1>Описание</h1>
<p>Добавляет элемент в коллекцию.</p>
</body>
</html>"#;

    const MODERN_METHOD_PAGE: &str = r#"<html>
<head><title></title></head>
<body>
<p class="V8SH_pagetitle">Добавить (Add)</p>
<p class="V8SH_heading">Синтаксис:</p>
<p>Добавить(&lt;Значение&gt;)</p>
<p class="V8SH_heading">Параметры:</p>
<table><tr><td>Значение</td><td>Произвольный</td><td>Добавляемое значение</td><td>Необязательный</td></tr></table>
<p class="V8SH_chapter">Описание:</p>
<p>Добавляет элемент в коллекцию.</p>
</body>
</html>"#;

    #[test]
    fn test_legacy_blocks() {
        let page = parse_html_page(LEGACY_METHOD_PAGE);
        assert_eq!(page.title, "Добавить");
        assert_eq!(page.block_content(BlockKind::Name), "Добавить (Add)");
        assert_eq!(
            page.block_content(BlockKind::Syntax),
            "Добавить(<Значение>)"
        );
        assert!(page
            .block_content(BlockKind::Parameters)
            .contains("<Значение> - Добавляемое значение."));
        assert_eq!(
            page.block_content(BlockKind::Description),
            "Добавляет элемент в коллекцию."
        );
    }

    #[test]
    fn test_modern_blocks() {
        let page = parse_html_page(MODERN_METHOD_PAGE);
        assert_eq!(page.title, "Добавить (Add)");
        assert_eq!(page.block_content(BlockKind::Name), "Добавить (Add)");
        assert!(page.block_content(BlockKind::Syntax).contains("Добавить"));
        assert_eq!(
            page.block_content(BlockKind::Description),
            "Добавляет элемент в коллекцию."
        );
    }

    #[test]
    fn test_table_flattens_to_rows() {
        let page = parse_html_page(MODERN_METHOD_PAGE);
        let params = page.block_content(BlockKind::Parameters);
        assert_eq!(
            params,
            "Значение | Произвольный | Добавляемое значение | Необязательный"
        );
    }

    #[test]
    fn test_list_items_become_bullets() {
        let html = r#"<html><body>
<h1>Описание</h1>
<ul><li>первый</li><li>второй</li></ul>
</body></html>"#;
        let page = parse_html_page(html);
        let content = page.block_content(BlockKind::Description);
        assert_eq!(content, "- первый\n- второй");
    }

    #[test]
    fn test_bold_paragraph_is_title() {
        let html = r#"<html><body>
<p><b>Описание</b></p>
<p>Текст описания.</p>
</body></html>"#;
        let page = parse_html_page(html);
        assert_eq!(
            page.block_content(BlockKind::Description),
            "Текст описания."
        );
    }

    #[test]
    fn test_page_without_titles_becomes_description() {
        let html = "<html><body><p>Просто текст.</p></body></html>";
        let page = parse_html_page(html);
        assert_eq!(page.block_content(BlockKind::Description), "Просто текст.");
    }

    #[test]
    fn test_title_normalization() {
        assert_eq!(BlockKind::from_title("Синтаксис:"), Some(BlockKind::Syntax));
        assert_eq!(
            BlockKind::from_title("Вариант синтаксиса: По индексу"),
            Some(BlockKind::Syntax)
        );
        assert_eq!(BlockKind::from_title("Return value"), Some(BlockKind::ReturnValue));
        assert_eq!(BlockKind::from_title("Нечто"), None);
    }

    #[test]
    fn test_script_content_skipped() {
        let html = r#"<html><body>
<script>var x = "Описание";</script>
<h1>Описание</h1>
<p>Настоящий текст.</p>
</body></html>"#;
        let page = parse_html_page(html);
        assert_eq!(page.block_content(BlockKind::Description), "Настоящий текст.");
    }
}
