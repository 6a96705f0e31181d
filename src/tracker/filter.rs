use chrono::NaiveDate;

use super::week::week_range;
use crate::model::activity::Activity;
use crate::repository::{ActivityRepository, RepoResult};

/// Activities of `employee_id` dated exactly `date`, in insertion order.
pub async fn activities_for_day<S>(
    store: &S,
    employee_id: i64,
    date: NaiveDate,
) -> RepoResult<Vec<Activity>>
where
    S: ActivityRepository + ?Sized,
{
    store.activities_between(employee_id, date, date).await
}

/// Activities of `employee_id` within ISO week `week` of `year`, Monday to
/// Sunday inclusive. `Ok(None)` when the week cannot be placed on the calendar.
pub async fn activities_for_week<S>(
    store: &S,
    employee_id: i64,
    year: i32,
    week: i32,
) -> RepoResult<Option<Vec<Activity>>>
where
    S: ActivityRepository + ?Sized,
{
    let Some((monday, sunday)) = week_range(year, week) else {
        return Ok(None);
    };

    store
        .activities_between(employee_id, monday, sunday)
        .await
        .map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::seed_if_empty;
    use crate::model::activity::NewActivity;
    use crate::repository::SqliteStore;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(employee_id: i64, date: NaiveDate, hours_of_work: u32) -> NewActivity {
        NewActivity {
            date,
            hours_of_work,
            employee_id: Some(employee_id),
            project_id: Some(1),
            role_id: Some(1),
            activity_type_id: Some(1),
        }
    }

    async fn store() -> SqliteStore {
        let store = SqliteStore::in_memory()
            .await
            .expect("Failed to create test database");
        seed_if_empty(&store, date(2026, 10, 16)).await.unwrap();
        store
    }

    #[actix_web::test]
    async fn day_filter_ignores_other_employees() {
        let store = store().await;
        store.insert_activity(&entry(2, date(2020, 8, 3), 4)).await.unwrap();
        store.insert_activity(&entry(1, date(2020, 8, 3), 2)).await.unwrap();

        let found = activities_for_day(&store, 1, date(2020, 8, 3)).await.unwrap();

        let ids: Vec<i64> = found.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 6]);
        assert!(found.iter().all(|a| a.employee_id == Some(1)));
    }

    #[actix_web::test]
    async fn day_filter_on_empty_day() {
        let store = store().await;
        let found = activities_for_day(&store, 1, date(2020, 8, 4)).await.unwrap();
        assert!(found.is_empty());
    }

    #[actix_web::test]
    async fn week_filter_includes_sunday_and_excludes_next_monday() {
        let store = store().await;

        // week 32 of 2020 is Aug 3..=Aug 9; activity 4 is on Monday Aug 10
        let found = activities_for_week(&store, 1, 2020, 32).await.unwrap().unwrap();
        let ids: Vec<i64> = found.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 3]);

        let next = activities_for_week(&store, 1, 2020, 33).await.unwrap().unwrap();
        assert_eq!(next.iter().map(|a| a.id).collect::<Vec<_>>(), vec![4]);
    }

    #[actix_web::test]
    async fn week_is_union_of_its_days() {
        let store = store().await;
        store.insert_activity(&entry(1, date(2020, 8, 5), 1)).await.unwrap();
        store.insert_activity(&entry(2, date(2020, 8, 6), 1)).await.unwrap();

        let week = activities_for_week(&store, 1, 2020, 32).await.unwrap().unwrap();

        let monday = date(2020, 8, 3);
        let mut union = Vec::new();
        for offset in 0..7 {
            let day = monday + Duration::days(offset);
            for activity in activities_for_day(&store, 1, day).await.unwrap() {
                if !union.contains(&activity) {
                    union.push(activity);
                }
            }
        }
        union.sort_by_key(|a| a.id);

        assert_eq!(week, union);
    }

    #[actix_web::test]
    async fn unplaceable_week_is_none() {
        let store = store().await;
        assert!(activities_for_week(&store, 1, 2020, i32::MAX).await.unwrap().is_none());
    }
}
