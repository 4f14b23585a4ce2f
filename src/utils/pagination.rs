//! Paginación de tablas
//!
//! Cálculo de páginas, rango de botones con elipsis y resumen
//! "Mostrando X - Y de Z" para los listados del panel.

use serde::Serialize;

pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 3] = [10, 25, 50];

/// Elemento del rango de paginación
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PageItem {
    Page(usize),
    Dots,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TablePagination {
    pub current_page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub sibling_count: usize,
}

impl TablePagination {
    pub fn new(current_page: usize, page_size: usize, total_items: usize) -> Self {
        Self {
            current_page,
            page_size,
            total_items,
            sibling_count: 1,
        }
    }

    pub fn with_sibling_count(mut self, sibling_count: usize) -> Self {
        self.sibling_count = sibling_count;
        self
    }

    fn safe_page_size(&self) -> usize {
        self.page_size.max(1)
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.safe_page_size()).max(1)
    }

    pub fn is_first_page(&self) -> bool {
        self.current_page <= 1
    }

    pub fn is_last_page(&self) -> bool {
        self.current_page >= self.total_pages()
    }

    /// Validar un cambio de página. `None` significa que no hay que hacer nada
    /// (fuera de rango o ya es la página actual).
    pub fn request_page(&self, page: usize) -> Option<usize> {
        if page < 1 || page > self.total_pages() || page == self.current_page {
            return None;
        }
        Some(page)
    }

    pub fn previous(&self) -> Option<usize> {
        self.current_page.checked_sub(1).and_then(|page| self.request_page(page))
    }

    pub fn next(&self) -> Option<usize> {
        self.request_page(self.current_page + 1)
    }

    /// Índices (1-based, inclusivos) de los elementos visibles
    pub fn summary(&self) -> (usize, usize) {
        if self.total_items == 0 {
            return (0, 0);
        }
        let size = self.safe_page_size();
        let start = self.current_page.saturating_sub(1) * size + 1;
        let end = self.total_items.min(self.current_page * size);
        (start, end)
    }

    pub fn summary_label(&self) -> String {
        let (start, end) = self.summary();
        format!("Mostrando {} - {} de {}", start, end, self.total_items)
    }

    /// Slice de la página actual sobre una colección ya cargada
    pub fn page_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let size = self.safe_page_size();
        let start = (self.current_page.saturating_sub(1) * size).min(items.len());
        let end = (start + size).min(items.len());
        &items[start..end]
    }

    /// Opciones de tamaño de página sin duplicados, positivas y ordenadas,
    /// incluyendo siempre el tamaño actual.
    pub fn page_size_options(&self, options: &[usize]) -> Vec<usize> {
        let mut unique: Vec<usize> = Vec::new();
        for option in options.iter().copied().filter(|option| *option > 0) {
            if !unique.contains(&option) {
                unique.push(option);
            }
        }
        let current = self.safe_page_size();
        if !unique.contains(&current) {
            unique.push(current);
        }
        unique.sort_unstable();
        unique
    }

    pub fn range(&self) -> Vec<PageItem> {
        let total_pages = self.total_pages();
        let siblings = self.sibling_count;
        let total_page_numbers = siblings * 2 + 5;

        if total_pages <= total_page_numbers {
            return pages(1, total_pages);
        }

        let left_sibling = self.current_page.saturating_sub(siblings).max(1);
        let right_sibling = (self.current_page + siblings).min(total_pages);

        let show_left_dots = left_sibling > 2;
        let show_right_dots = right_sibling + 1 < total_pages;

        match (show_left_dots, show_right_dots) {
            (false, true) => {
                let mut items = pages(1, 3 + siblings * 2);
                items.push(PageItem::Dots);
                items.push(PageItem::Page(total_pages));
                items
            }
            (true, false) => {
                let mut items = vec![PageItem::Page(1), PageItem::Dots];
                items.extend(pages(total_pages - (2 + siblings * 2), total_pages));
                items
            }
            (true, true) => {
                let mut items = vec![PageItem::Page(1), PageItem::Dots];
                items.extend(pages(left_sibling, right_sibling));
                items.push(PageItem::Dots);
                items.push(PageItem::Page(total_pages));
                items
            }
            (false, false) => pages(1, total_pages),
        }
    }
}

fn pages(start: usize, end: usize) -> Vec<PageItem> {
    (start..=end).map(PageItem::Page).collect()
}
