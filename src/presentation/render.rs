//! Plain-text rendering. Highlighted segments are wrapped in `*`.

use std::fmt;

use super::highlight::Segment;
use super::views::{
    FilterBarView, PaginationView, PostDetailView, PostTableView, SelectOption, UserDetailView,
};

struct Segments<'a>(&'a [Segment]);

impl fmt::Display for Segments<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in self.0 {
            if segment.highlighted {
                write!(f, "*{}*", segment.text)?;
            } else {
                f.write_str(&segment.text)?;
            }
        }
        Ok(())
    }
}

struct Options<'a>(&'a [SelectOption]);

impl fmt::Display for Options<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, option) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            if option.selected {
                write!(f, "[{}]", option.value)?;
            } else {
                f.write_str(&option.value)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for FilterBarView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "search: {}", self.search)?;
        writeln!(f, "tag:    {}", Options(&self.tags))?;
        writeln!(f, "sort:   {}", Options(&self.sort_by))?;
        if self.order_enabled {
            writeln!(f, "order:  {}", Options(&self.order))
        } else {
            writeln!(f, "order:  (choose a sort field)")
        }
    }
}

impl fmt::Display for PostTableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return writeln!(f, "no posts");
        }
        writeln!(f, "{:>5}  {:<50}  {:<16}  {:>5}  {:>5}", "ID", "TITLE", "AUTHOR", "LIKE", "DISL")?;
        for row in &self.rows {
            let author = row.author.as_ref().map_or("-", |a| a.username.as_str());
            let title = Segments(&row.title).to_string();
            writeln!(
                f,
                "{:>5}  {:<50}  {:<16}  {:>5}  {:>5}",
                row.id, title, author, row.likes, row.dislikes
            )?;
            if !row.tags.is_empty() {
                let chips: Vec<String> = row
                    .tags
                    .iter()
                    .map(|chip| {
                        if chip.selected {
                            format!("[#{}]", chip.slug)
                        } else {
                            format!("#{}", chip.slug)
                        }
                    })
                    .collect();
                writeln!(f, "       {}", chips.join(" "))?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for PaginationView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prev = if self.prev_enabled { "< prev" } else { "  ----" };
        let next = if self.next_enabled { "next >" } else { "---- " };
        writeln!(
            f,
            "{prev}  page {} ({} of {} total)  {next}   size: {}",
            self.page,
            self.skip,
            self.total,
            Options(&self.page_size_options)
        )
    }
}

impl fmt::Display for PostDetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#{} {}", self.id, Segments(&self.title))?;
        writeln!(f)?;
        writeln!(f, "{}", Segments(&self.body))?;
        writeln!(f)?;
        writeln!(f, "comments ({})", self.comments.len())?;
        for comment in &self.comments {
            writeln!(
                f,
                "  [{}] {}: {}  (likes {})",
                comment.id,
                comment.author,
                Segments(&comment.body),
                comment.likes
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for UserDetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn line(f: &mut fmt::Formatter<'_>, label: &str, value: Option<&str>) -> fmt::Result {
            writeln!(f, "{label:<9}{}", value.unwrap_or("-"))
        }

        line(f, "image:", self.image.as_deref())?;
        line(f, "username:", Some(self.username.as_str()))?;
        line(f, "name:", self.name.as_deref())?;
        line(f, "age:", self.age.map(|age| age.to_string()).as_deref())?;
        line(f, "email:", self.email.as_deref())?;
        line(f, "phone:", self.phone.as_deref())?;
        line(f, "address:", self.address.as_deref())?;
        line(f, "company:", self.company.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presentation::highlight;
    use crate::presentation::views::CommentView;

    #[test]
    fn detail_marks_highlights_and_lists_comments() {
        let view = PostDetailView {
            id: 1,
            title: highlight("His mother", "his"),
            body: highlight("body", ""),
            comments: vec![CommentView {
                id: 1,
                author: "emilys".to_string(),
                body: highlight("Nice", ""),
                likes: 3,
            }],
        };
        let text = view.to_string();
        assert!(text.starts_with("#1 *His* mother\n"));
        assert!(text.contains("[1] emilys: Nice  (likes 3)"));
    }

    #[test]
    fn options_bracket_the_selection() {
        let options = [
            SelectOption {
                value: "all".to_string(),
                selected: false,
            },
            SelectOption {
                value: "test".to_string(),
                selected: true,
            },
        ];
        assert_eq!(Options(&options).to_string(), "all [test]");
    }
}
