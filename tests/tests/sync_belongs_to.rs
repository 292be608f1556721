use tests::*;

use pretty_assertions::assert_eq;
use relink_core::driver::Operation;

#[tokio::test]
async fn links_an_existing_owner() {
    let mut t = Test::setup(&mut blog()).await;

    t.seed("user", record!({ "id": 7, "name": "ann" })).await;
    t.seed("user", record!({ "id": 8, "name": "bob" })).await;
    t.seed("post", record!({ "id": 2, "owner": 8 })).await;

    let mut parents = [t.instance("post", 2).await];
    t.log.clear();

    t.db
        .sync(&mut parents, &record!({ "owner": { "id": 7, "name": "ann b" } }), &["owner"])
        .await
        .unwrap();

    // update the owner, null the parent's column, then save the parent
    let (op, _) = t.log.pop();
    assert!(matches!(op, Operation::Update(ref update) if update.model == "user"));

    let (op, _) = t.log.pop();
    let Operation::Update(unlink) = op else {
        panic!("expected an update; got {op}")
    };
    assert_eq!(unlink.model, "post");
    assert_eq!(unlink.values, record!({ "owner": null }));

    let (op, _) = t.log.pop();
    let Operation::Update(save) = op else {
        panic!("expected an update; got {op}")
    };
    assert_eq!(save.values, record!({ "id": 2, "owner": 7 }));

    assert!(t.log.is_empty());

    assert_eq!(parents[0].get("owner"), Some(&json!(7)));
    assert_eq!(t.column("post", ("id", json!(2)), "owner").await, vec![json!(7)]);
    assert_eq!(t.column("user", ("id", json!(7)), "name").await, vec![json!("ann b")]);
}

#[tokio::test]
async fn creates_a_new_owner() {
    let t = Test::setup(&mut blog()).await;

    t.seed("user", record!({ "id": 1, "name": "ann" })).await;
    t.seed("post", record!({ "id": 2, "owner": 1 })).await;

    let mut parents = [t.instance("post", 2).await];
    t.db
        .sync(&mut parents, &record!({ "owner": { "name": "zed" } }), &["owner"])
        .await
        .unwrap();

    assert_eq!(parents[0].get("owner"), Some(&json!(2)));
    assert_eq!(t.column("post", ("id", json!(2)), "owner").await, vec![json!(2)]);
    assert_eq!(t.column("user", ("id", json!(2)), "name").await, vec![json!("zed")]);
}

#[tokio::test]
async fn bare_key_links_without_updating() {
    let mut t = Test::setup(&mut blog()).await;

    t.seed("user", record!({ "id": 7, "name": "ann" })).await;
    t.seed("post", record!({ "id": 1 })).await;
    t.seed("post", record!({ "id": 2 })).await;

    let mut parents = [t.instance("post", 1).await, t.instance("post", 2).await];
    t.log.clear();

    t.db
        .sync(&mut parents, &record!({ "owner": 7 }), &["owner"])
        .await
        .unwrap();

    for post in [1, 2] {
        assert_eq!(t.column("post", ("id", json!(post)), "owner").await, vec![json!(7)]);
    }

    assert_eq!(t.log.first(|op| op.model() == "user"), None);
}

#[tokio::test]
async fn null_owner_is_left_alone() {
    let t = Test::setup(&mut blog()).await;

    t.seed("user", record!({ "id": 7 })).await;
    t.seed("post", record!({ "id": 1, "owner": 7 })).await;

    let mut parents = [t.instance("post", 1).await];
    let before = t.log.len();

    t.db
        .sync(&mut parents, &record!({ "owner": null }), &["owner"])
        .await
        .unwrap();

    assert_eq!(t.log.len(), before);
    assert_eq!(t.column("post", ("id", json!(1)), "owner").await, vec![json!(7)]);
}

#[tokio::test]
async fn empty_array_clears_the_owner() {
    let t = Test::setup(&mut blog()).await;

    t.seed("user", record!({ "id": 8 })).await;
    t.seed("post", record!({ "id": 2, "owner": 8 })).await;

    let mut parents = [t.instance("post", 2).await];
    t.db
        .sync(&mut parents, &record!({ "owner": [] }), &["owner"])
        .await
        .unwrap();

    assert_eq!(parents[0].get("owner"), Some(&json!(null)));
    assert_eq!(t.column("post", ("id", json!(2)), "owner").await, vec![json!(null)]);
}
