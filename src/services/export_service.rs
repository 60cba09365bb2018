use rust_xlsxwriter::*;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::Result;
use crate::models::market::Order;

pub struct ExportService;

impl ExportService {
    /// Generate a styled XLSX workbook from the order book.
    pub fn generate_orders_xlsx(
        orders: &[Order],
        product_names: &HashMap<Uuid, String>,
    ) -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Orders")?;

        let header_bg = Color::RGB(0x0F172A);
        let header_text = Color::White;
        let alt_row = Color::RGB(0xF8FAFC);
        let border_color = Color::RGB(0xE2E8F0);
        let shipped_color = Color::RGB(0x10B981);
        let pending_color = Color::RGB(0xF59E0B);

        let columns = [
            ("№", 8.0),
            ("Product", 32.0),
            ("Sizes", 14.0),
            ("Full name", 28.0),
            ("Email", 30.0),
            ("Address", 36.0),
            ("City", 18.0),
            ("Country", 18.0),
            ("Postal code", 14.0),
            ("Shipping", 12.0),
            ("Created", 20.0),
        ];

        for (i, (_, width)) in columns.iter().enumerate() {
            worksheet.set_column_width(i as u16, *width)?;
        }

        let title_format = Format::new()
            .set_font_size(14)
            .set_bold()
            .set_font_color(header_text)
            .set_background_color(header_bg)
            .set_align(FormatAlign::CenterAcross)
            .set_align(FormatAlign::VerticalCenter);
        worksheet.set_row_height(0, 32)?;
        let title = format!(
            "Merch orders: {} total (exported {})",
            orders.len(),
            chrono::Utc::now().format("%d.%m.%Y %H:%M UTC")
        );
        worksheet.merge_range(0, 0, 0, (columns.len() - 1) as u16, &title, &title_format)?;

        let header_format = Format::new()
            .set_bold()
            .set_font_size(10)
            .set_font_color(header_text)
            .set_background_color(header_bg)
            .set_align(FormatAlign::Center)
            .set_border(FormatBorder::Thin)
            .set_border_color(border_color);
        for (i, (name, _)) in columns.iter().enumerate() {
            worksheet.write_with_format(1, i as u16, *name, &header_format)?;
        }

        for (idx, order) in orders.iter().enumerate() {
            let row = (idx + 2) as u32;
            let mut cell_format = Format::new()
                .set_font_size(10)
                .set_border(FormatBorder::Thin)
                .set_border_color(border_color);
            if idx % 2 == 0 {
                cell_format = cell_format.set_background_color(alt_row);
            }
            let shipping_format = cell_format.clone().set_font_color(if order.is_shipping {
                shipped_color
            } else {
                pending_color
            });

            let product = product_names
                .get(&order.product_uuid)
                .cloned()
                .unwrap_or_else(|| order.product_uuid.to_string());

            worksheet.write_with_format(row, 0, (idx + 1) as u32, &cell_format)?;
            worksheet.write_with_format(row, 1, product, &cell_format)?;
            worksheet.write_with_format(row, 2, order.sizes.join(", "), &cell_format)?;
            worksheet.write_with_format(row, 3, order.full_name.as_str(), &cell_format)?;
            worksheet.write_with_format(row, 4, order.email.as_str(), &cell_format)?;
            worksheet.write_with_format(row, 5, order.address.as_str(), &cell_format)?;
            worksheet.write_with_format(row, 6, order.city.as_str(), &cell_format)?;
            worksheet.write_with_format(row, 7, order.country.as_str(), &cell_format)?;
            worksheet.write_with_format(row, 8, order.zip_code.as_str(), &cell_format)?;
            worksheet.write_with_format(
                row,
                9,
                if order.is_shipping { "shipped" } else { "pending" },
                &shipping_format,
            )?;
            worksheet.write_with_format(
                row,
                10,
                order.created_at.format("%Y-%m-%d %H:%M").to_string(),
                &cell_format,
            )?;
        }

        let buffer = workbook.save_to_buffer()?;
        Ok(buffer)
    }
}
