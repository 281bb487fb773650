//! Presenter for the trip brief: route, dates, and total cost.

use std::sync::Arc;

use chrono::{DateTime, Datelike, Utc};

use crate::domain::criteria::Criteria;
use crate::domain::error::Error;
use crate::domain::point::Point;
use crate::domain::ports::View;
use crate::domain::presenter::{Interest, Presenter};
use crate::domain::trip_model::TripModel;
use crate::domain::url_params::{UrlParams, UrlParamsStore};

/// Stops shown in full before the route compresses to its endpoints.
const ROUTE_STOP_LIMIT: usize = 3;

/// View-state for the trip brief.
///
/// Computed over the whole schedule in chronological order, regardless of
/// the filter and sort selected in the URL. An empty schedule renders as
/// empty strings and a zero cost.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BriefViewState {
    /// Route summary, for example `Amsterdam — Chamonix — Geneva`.
    pub route: String,
    /// Date span summary, for example `18 — 20 Mar`.
    pub dates: String,
    /// Base prices plus selected offer prices, summed over every point.
    pub total_cost: u64,
}

/// Keeps the trip brief in step with the model.
pub struct BriefPresenter {
    presenter: Arc<Presenter<BriefViewState>>,
}

impl BriefPresenter {
    /// Wire the brief up and render its initial state.
    pub fn mount(
        model: Arc<TripModel>,
        url_params: Arc<UrlParamsStore>,
        view: Arc<dyn View<BriefViewState>>,
    ) -> Result<Self, Error> {
        let presenter = Presenter::mount(
            model,
            url_params,
            view,
            Interest {
                model: true,
                navigation: false,
            },
            Box::new(compute),
        )?;
        Ok(Self { presenter })
    }

    /// Re-render on demand.
    pub fn refresh(&self) -> Result<(), Error> {
        self.presenter.update_view()
    }
}

fn compute(model: &TripModel, _params: &UrlParams) -> Result<BriefViewState, Error> {
    let points = model.points(Criteria::default())?;
    if points.is_empty() {
        return Ok(BriefViewState {
            route: String::new(),
            dates: String::new(),
            total_cost: 0,
        });
    }

    let dates = match (points.first(), points.last()) {
        (Some(first), Some(last)) => date_summary(first.start_date_time, last.end_date_time),
        _ => String::new(),
    };

    Ok(BriefViewState {
        route: route_summary(model, &points)?,
        dates,
        total_cost: total_cost(model, &points)?,
    })
}

/// Destination names in visit order, consecutive repeats collapsed.
///
/// Up to [`ROUTE_STOP_LIMIT`] stops are shown in full; longer routes
/// compress to their endpoints around an ellipsis.
fn route_summary(model: &TripModel, points: &[Point]) -> Result<String, Error> {
    let mut names: Vec<String> = Vec::new();
    for point in points {
        let destination = model
            .destination(&point.destination_id)?
            .ok_or_else(|| Error::unknown_destination(point.destination_id.clone()))?;
        if names.last() != Some(&destination.name) {
            names.push(destination.name);
        }
    }

    if names.len() <= ROUTE_STOP_LIMIT {
        Ok(names.join(" — "))
    } else {
        match (names.first(), names.last()) {
            (Some(first), Some(last)) => Ok(format!("{first} — … — {last}")),
            _ => Ok(String::new()),
        }
    }
}

/// Span between the first start and the last end, month names elided
/// where the boundaries share them.
fn date_summary(start: DateTime<Utc>, end: DateTime<Utc>) -> String {
    if start.date_naive() == end.date_naive() {
        return start.format("%-d %b").to_string();
    }
    if start.year() == end.year() && start.month() == end.month() {
        format!("{} — {}", start.format("%-d"), end.format("%-d %b"))
    } else {
        format!("{} — {}", start.format("%-d %b"), end.format("%-d %b"))
    }
}

fn total_cost(model: &TripModel, points: &[Point]) -> Result<u64, Error> {
    let mut total: u64 = 0;
    for point in points {
        total += u64::from(point.base_price);
        let group = model.offer_group(point.kind)?;
        for id in &point.offer_ids {
            let offer = group
                .as_ref()
                .and_then(|group| group.offers.iter().find(|offer| &offer.id == id))
                .ok_or_else(|| Error::unknown_offer(id.clone(), point.kind))?;
            total += u64::from(offer.price);
        }
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    //! Date span rendering coverage.

    use super::*;

    fn instant(value: &str) -> DateTime<Utc> {
        value.parse().expect("timestamp")
    }

    #[test]
    fn same_day_spans_render_once() {
        let summary = date_summary(
            instant("2026-03-18T10:00:00Z"),
            instant("2026-03-18T22:00:00Z"),
        );
        assert_eq!(summary, "18 Mar");
    }

    #[test]
    fn same_month_spans_elide_the_first_month() {
        let summary = date_summary(
            instant("2026-03-18T10:00:00Z"),
            instant("2026-03-20T11:00:00Z"),
        );
        assert_eq!(summary, "18 — 20 Mar");
    }

    #[test]
    fn cross_month_spans_render_both_months() {
        let summary = date_summary(
            instant("2026-03-28T10:00:00Z"),
            instant("2026-04-02T11:00:00Z"),
        );
        assert_eq!(summary, "28 Mar — 2 Apr");
    }
}
