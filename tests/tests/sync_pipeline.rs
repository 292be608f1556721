use tests::*;

use pretty_assertions::assert_eq;
use relink::Record;
use relink_core::driver::Operation;

fn is_update_of(op: &Operation, model: &str) -> bool {
    op.as_update().is_some_and(|update| update.model == model)
}

async fn seed_tags(t: &Test) {
    for post in [1, 2] {
        t.seed("post", record!({ "id": post })).await;
    }
    for tag in [5, 6, 9] {
        t.seed("tag", record!({ "id": tag, "label": "old" })).await;
    }
    t.seed("post_tag", record!({ "post": 1, "tag": 9 })).await;
    t.seed("post_tag", record!({ "post": 2, "tag": 9 })).await;
}

fn desired_tags() -> Record {
    record!({
        "tags": [
            { "id": 5, "label": "five" },
            { "id": 6, "label": "six" },
            { "label": "new" },
        ],
    })
}

#[tokio::test]
async fn phases_run_in_order() {
    let mut t = Test::setup(&mut blog()).await;
    seed_tags(&t).await;

    let mut parents = [t.instance("post", 1).await, t.instance("post", 2).await];
    t.log.clear();

    t.db
        .sync(&mut parents, &desired_tags(), &["tags"])
        .await
        .unwrap();

    let last_update = t.log.last(|op| is_update_of(op, "tag")).unwrap();
    let first_unlink = t.log.first(|op| is_update_of(op, "post_tag")).unwrap();
    let last_unlink = t.log.last(|op| is_update_of(op, "post_tag")).unwrap();
    let first_link = t
        .log
        .first(|op| op.is_insert() || is_update_of(op, "post"))
        .unwrap();

    assert!(last_update < first_unlink);
    assert!(last_unlink < first_link);

    // two tag updates, one unlink per parent, then per parent: one tag
    // creation, three join rows and the parent save
    assert_eq!(t.log.len(), 2 + 2 + 2 * 5);
}

#[tokio::test]
async fn failed_update_stops_the_sync() {
    let t = Test::setup(&mut blog()).await;
    seed_tags(&t).await;

    let mut parents = [t.instance("post", 1).await, t.instance("post", 2).await];
    let before = t.log.len();

    t.fail_when(|op| is_update_of(op, "tag"));

    let err = t
        .db
        .sync(&mut parents, &desired_tags(), &["tags"])
        .await
        .unwrap_err();

    assert!(err.is_driver());
    assert!(err.to_string().starts_with("injected failure: update `tag`"));

    // nothing reached the later phases
    let ops = t.log.operations();
    assert!(ops[before..]
        .iter()
        .all(|op| !op.is_insert() && !is_update_of(op, "post_tag")));
    assert_eq!(t.column("post_tag", ("post", json!(1)), "tag").await, vec![json!(9)]);
}

#[tokio::test]
async fn failed_link_leaves_unlinked_state() {
    let t = Test::setup(&mut blog()).await;
    seed_tags(&t).await;

    let mut parents = [t.instance("post", 1).await];
    t.fail_when(|op| op.is_insert() && op.model() == "post_tag");

    let err = t
        .db
        .sync(&mut parents, &desired_tags(), &["tags"])
        .await
        .unwrap_err();
    assert!(err.is_driver());

    // No rollback: the unlink stays, the tag updates stay
    assert!(t.column("post_tag", ("post", json!(1)), "tag").await.is_empty());
    assert_eq!(t.column("tag", ("id", json!(5)), "label").await, vec![json!("five")]);

    // The failed save consumed the staged links
    assert!(parents[0].pending().is_empty());
}

#[tokio::test]
async fn retry_after_failed_link_does_not_duplicate() {
    let t = Test::setup(&mut blog()).await;

    t.seed("post", record!({ "id": 1 })).await;
    t.seed("label", record!({ "id": 3 })).await;

    let mut parents = [t.instance("post", 1).await];
    let values = record!({ "labels": [3] });

    t.fail_when(|op| op.is_insert() && op.model() == "post_label");
    let err = t.db.sync(&mut parents, &values, &["labels"]).await.unwrap_err();
    assert!(err.is_driver());

    t.clear_failure();
    t.db.sync(&mut parents, &values, &["labels"]).await.unwrap();

    assert_eq!(
        t.column("post_label", ("post", json!(1)), "label").await,
        vec![json!(3)]
    );
}

#[tokio::test]
async fn retry_links_each_desired_tag_once() {
    let t = Test::setup(&mut blog()).await;
    seed_tags(&t).await;

    let mut parents = [t.instance("post", 1).await];

    t.fail_when(|op| op.is_insert() && op.model() == "post_tag");
    assert!(t.db.sync(&mut parents, &desired_tags(), &["tags"]).await.is_err());

    t.clear_failure();
    t.db.sync(&mut parents, &desired_tags(), &["tags"]).await.unwrap();

    let linked = t.column("post_tag", ("post", json!(1)), "tag").await;
    assert_eq!(linked.len(), 3);
    assert_eq!(&linked[..2], &[json!(5), json!(6)]);
}

#[tokio::test]
async fn bounded_concurrency_reaches_the_same_state() {
    let mut unbounded = blog();
    let mut bounded = blog();
    bounded.max_concurrency(1);

    let mut states = vec![];

    for (builder, limit) in [(&mut unbounded, None), (&mut bounded, Some(1))] {
        let t = Test::setup(builder).await;
        assert_eq!(t.db.config().max_concurrency, limit);

        seed_tags(&t).await;
        let mut parents = [t.instance("post", 1).await, t.instance("post", 2).await];

        t.db
            .sync(&mut parents, &desired_tags(), &["tags"])
            .await
            .unwrap();

        if limit.is_some() {
            assert_eq!(t.peak_concurrency(), 1);
        } else {
            assert!(t.peak_concurrency() > 1);
        }

        // Which parent's new tag got which key depends on scheduling
        let mut linked = vec![];
        for post in [1, 2] {
            linked.extend(t.column("post_tag", ("post", json!(post)), "tag").await);
        }
        linked.sort_by_key(|tag| tag.as_u64());
        states.push((linked, t.all("tag").await));
    }

    assert_eq!(states[0], states[1]);
}
