mod common;

use common::TestApp;
use sistema_cajones::forms::{CajonForm, FormError, FormState, LoginForm, ObjetoForm};
use sistema_cajones::models::{Tamanio, TipoObjeto};
use sistema_cajones::notifications::NotificationKind;
use std::sync::atomic::Ordering;

#[tokio::test]
async fn test_valid_cajon_create_calls_endpoint_once() {
    let app = TestApp::logged_in().await;
    let mut form = CajonForm::new();
    form.set_nombre("Cajon de Oficina").set_capacidad(15);

    let cajon = form
        .submit(app.ctx.cajones.as_ref(), app.notifier.as_ref())
        .await
        .unwrap();

    assert_eq!(app.backend.count("POST", "/cajones/"), 1);
    assert_eq!(cajon.nombre, "Cajon de Oficina");
    assert_eq!(cajon.capacidad_maxima, 15);
    assert_eq!(form.state(), &FormState::Success);
    assert_eq!(
        app.notifier.messages(NotificationKind::Success),
        vec!["Cajón creado exitosamente"]
    );
}

#[tokio::test]
async fn test_invalid_cajon_never_reaches_network() {
    let app = TestApp::logged_in().await;
    let mut form = CajonForm::new();
    form.set_nombre("Cajón #1").set_capacidad(0);

    let err = form
        .submit(app.ctx.cajones.as_ref(), app.notifier.as_ref())
        .await
        .unwrap_err();

    let errors = err.field_errors().unwrap();
    assert_eq!(errors["nombre"], "Solo se permiten letras, números y espacios");
    assert_eq!(errors["capacidad_maxima"], "La capacidad debe ser al menos 1");
    assert_eq!(form.state(), &FormState::Editing);
    assert!(app.backend.calls.lock().unwrap().is_empty());
    assert!(app.notifier.all().is_empty());
}

#[tokio::test]
async fn test_server_error_keeps_form_editable() {
    let app = TestApp::logged_in().await;

    // 1. Occupy the name
    let mut first = CajonForm::new();
    first.set_nombre("Oficina");
    first
        .submit(app.ctx.cajones.as_ref(), app.notifier.as_ref())
        .await
        .unwrap();

    // 2. Duplicate is rejected by the server
    let mut form = CajonForm::new();
    form.set_nombre("Oficina");
    let err = form
        .submit(app.ctx.cajones.as_ref(), app.notifier.as_ref())
        .await
        .unwrap_err();
    assert!(matches!(err, FormError::Service(_)));
    assert_eq!(
        form.state(),
        &FormState::Error("Ya existe un cajón con este nombre.".to_string())
    );
    assert_eq!(
        app.notifier.messages(NotificationKind::Error),
        vec!["Ya existe un cajón con este nombre."]
    );

    // 3. Fix and resubmit
    form.set_nombre("Oficina 2");
    assert_eq!(form.state(), &FormState::Editing);
    let cajon = form
        .submit(app.ctx.cajones.as_ref(), app.notifier.as_ref())
        .await
        .unwrap();
    assert_eq!(cajon.nombre, "Oficina 2");
}

#[tokio::test]
async fn test_edit_form_updates_in_place() {
    let app = TestApp::logged_in().await;
    let mut alta = CajonForm::new();
    alta.set_nombre("Ropa").set_capacidad(25);
    let cajon = alta
        .submit(app.ctx.cajones.as_ref(), app.notifier.as_ref())
        .await
        .unwrap();

    let mut form = CajonForm::editar(&cajon);
    form.set_capacidad(30);
    let actualizado = form
        .submit(app.ctx.cajones.as_ref(), app.notifier.as_ref())
        .await
        .unwrap();

    assert_eq!(actualizado.id, cajon.id);
    assert_eq!(actualizado.capacidad_maxima, 30);
    assert_eq!(app.backend.count("PUT", &format!("/cajones/{}/", cajon.id)), 1);
    assert!(
        app.notifier
            .messages(NotificationKind::Success)
            .contains(&"Cajón actualizado exitosamente".to_string())
    );
}

#[tokio::test]
async fn test_objeto_form_options_and_submit() {
    let app = TestApp::logged_in().await;
    let mut alta = CajonForm::new();
    alta.set_nombre("Electronicos");
    let cajon = alta
        .submit(app.ctx.cajones.as_ref(), app.notifier.as_ref())
        .await
        .unwrap();

    // 1. Options load with the configuration endpoints down
    app.backend.fail_config.store(true, Ordering::SeqCst);
    let mut form = ObjetoForm::con_cajon(cajon.id.clone());
    form.cargar_opciones(
        app.ctx.cajones.as_ref(),
        app.ctx.objetos.as_ref(),
        app.notifier.as_ref(),
    )
    .await
    .unwrap();
    assert_eq!(form.cajones().len(), 1);
    assert_eq!(form.tipos().len(), 8);
    assert_eq!(form.tamanios().len(), 3);

    // 2. Missing selections are caught locally
    form.set_nombre("Cable USB-C").set_tipo(None);
    let err = form
        .submit(app.ctx.objetos.as_ref(), app.notifier.as_ref())
        .await
        .unwrap_err();
    assert_eq!(
        err.field_errors().unwrap()["tipo_objeto"],
        "Debe seleccionar un tipo de objeto"
    );
    assert_eq!(app.backend.count("POST", "/objetos/"), 0);

    // 3. Valid submit
    form.set_tipo(Some(TipoObjeto::Cables))
        .set_tamanio(Some(Tamanio::Pequeno));
    let objeto = form
        .submit(app.ctx.objetos.as_ref(), app.notifier.as_ref())
        .await
        .unwrap();
    assert!(objeto.pertenece_a(&cajon.id));
    assert_eq!(objeto.tipo_objeto, TipoObjeto::Cables);
    assert!(
        app.notifier
            .messages(NotificationKind::Success)
            .contains(&"Objeto creado exitosamente".to_string())
    );
}

#[tokio::test]
async fn test_login_form() {
    let app = TestApp::new().await;

    let mut form = LoginForm::new();
    let err = form
        .submit(&app.ctx.auth, app.notifier.as_ref())
        .await
        .unwrap_err();
    assert_eq!(err.field_errors().unwrap().len(), 2);
    assert!(app.backend.calls.lock().unwrap().is_empty());

    form.set_username("ana").set_password("secreto");
    form.submit(&app.ctx.auth, app.notifier.as_ref())
        .await
        .unwrap();
    assert_eq!(form.state(), &FormState::Success);
    assert!(app.ctx.auth.is_authenticated());
}
