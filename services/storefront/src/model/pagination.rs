use std::result::Result as DefaultResult;

use ecommerce_common::api::dto::GenericRangeErrorDto;

use crate::api::web::dto::{LowerBoundErrorDto, PageEnvelopeDto, PageQueryErrorDto};
use crate::constant::{hard_limit, pagination as PageConst};

/// offset-based window of a page, always in valid range once constructed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageWindow {
    pub limit: u32,
    pub offset: u64,
}

/// markers derived from total number of matching records and current window
#[derive(Debug, PartialEq)]
pub struct PageMarkerModel {
    pub has_next: bool,
    pub has_previous: bool,
    pub next_offset: u64,
    pub previous_offset: u64,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self {
            limit: PageConst::DEFAULT_LIMIT,
            offset: PageConst::DEFAULT_OFFSET,
        }
    }
}

impl PageWindow {
    pub fn try_new(
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> DefaultResult<Self, PageQueryErrorDto> {
        let limit = limit.unwrap_or(PageConst::DEFAULT_LIMIT as i64);
        let offset = offset.unwrap_or(PageConst::DEFAULT_OFFSET as i64);
        let lmt_rs = Self::check_range(limit, PageConst::MIN_LIMIT, hard_limit::MAX_PAGE_LIMIT);
        let ofs_rs = if offset < 0 {
            Some(LowerBoundErrorDto {
                min_: 0,
                given: offset,
            })
        } else {
            None
        };
        if lmt_rs.is_none() && ofs_rs.is_none() {
            Ok(Self {
                limit: limit as u32,
                offset: offset as u64,
            })
        } else {
            Err(PageQueryErrorDto {
                limit: lmt_rs,
                offset: ofs_rs,
            })
        }
    }

    fn check_range(given: i64, min_: u32, max_: u32) -> Option<GenericRangeErrorDto> {
        if given < (min_ as i64) || given > (max_ as i64) {
            Some(GenericRangeErrorDto { max_, min_, given })
        } else {
            None
        }
    }
} // end of impl PageWindow

impl PageMarkerModel {
    pub fn estimate(total: u64, window: &PageWindow) -> Self {
        let (limit, offset) = (window.limit as u64, window.offset);
        let next_offset = offset + limit;
        Self {
            has_next: next_offset < total,
            has_previous: offset > 0,
            next_offset,
            previous_offset: offset.saturating_sub(limit),
        }
    }

    pub fn into_envelope(self, num_returned: usize) -> PageEnvelopeDto {
        PageEnvelopeDto {
            next: if self.has_next {
                Some(self.next_offset.to_string())
            } else {
                None
            },
            limit: num_returned,
            previous: if self.has_previous {
                Some(self.previous_offset)
            } else {
                None
            },
        }
    }

    /// envelope for a query which matches nothing at all
    pub fn empty_envelope() -> PageEnvelopeDto {
        PageEnvelopeDto {
            next: None,
            limit: 0,
            previous: None,
        }
    }
} // end of impl PageMarkerModel
