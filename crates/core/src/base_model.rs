//! The framework's base model class, reduced to what the classifier needs:
//! the set of public method names it defines.
//!
//! Any model method declared on that class, or whose name appears here, is
//! framework plumbing (or an override of it) and is never reported as a
//! relation.

use std::collections::HashSet;

/// Fully qualified name of the Eloquent base model class.
pub const ELOQUENT_MODEL_CLASS: &str = "Illuminate\\Database\\Eloquent\\Model";

/// Methods of the Eloquent base model, including those mixed in from its
/// concerns (attributes, events, relationships, timestamps, guarding, hiding,
/// global scopes). Protected and static ones are listed too: a model that
/// redeclares them as public still only overrides framework plumbing.
#[rustfmt::skip]
const ELOQUENT_MODEL_METHODS: &[&str] = &[
    // Model
    "__construct", "__call", "__callStatic", "__get", "__set", "__isset", "__unset",
    "__toString", "__sleep", "__wakeup", "all", "broadcastChannel", "broadcastChannelRoute",
    "clearBootedModels", "delete", "deleteOrFail", "deleteQuietly", "destroy", "escapeWhenCastingToString",
    "fill", "fillJsonAttribute", "forceDelete", "forceFill", "fresh", "freshTimestamp",
    "getConnection", "getConnectionName", "getConnectionResolver", "getForeignKey",
    "getIncrementing", "getKey", "getKeyName", "getKeyType", "getMorphClass", "getPerPage",
    "getQueueableClassName", "getQueueableConnection", "getQueueableId", "getQueueableRelations",
    "getRouteKey", "getRouteKeyName", "getTable", "hasNamedScope", "increment", "decrement",
    "is", "isNot", "isIgnoringTouch", "jsonSerialize", "load", "loadAggregate", "loadAvg",
    "loadCount", "loadExists", "loadMax", "loadMin", "loadMissing", "loadMorph",
    "loadMorphAggregate", "loadMorphCount", "loadSum", "newCollection", "newEloquentBuilder",
    "newFromBuilder", "newInstance", "newModelQuery", "newPivot", "newQuery",
    "newQueryForRestoration", "newQueryWithoutRelationships", "newQueryWithoutScope",
    "newQueryWithoutScopes", "offsetExists", "offsetGet", "offsetSet", "offsetUnset", "on",
    "onWriteConnection", "preventAccessingMissingAttributes", "preventLazyLoading",
    "preventSilentlyDiscardingAttributes", "push", "pushQuietly", "query", "refresh",
    "registerGlobalScopes", "replicate", "replicateQuietly", "resolveChildRouteBinding",
    "resolveConnection", "resolveRouteBinding", "resolveRouteBindingQuery",
    "resolveSoftDeletableChildRouteBinding", "resolveSoftDeletableRouteBinding", "save",
    "saveOrFail", "saveQuietly", "setConnection", "setConnectionResolver", "setIncrementing",
    "setKeyName", "setKeyType", "setPerPage", "setTable", "shouldBeStrict", "toArray", "toJson",
    "touch", "touchQuietly", "unsetConnectionResolver", "unsetEventDispatcher", "update",
    "updateOrFail", "updateQuietly", "usesTimestamps", "with", "withoutTouching",
    "withoutTouchingOn", "callNamedScope", "handleLazyLoadingViolationUsing",
    "handleDiscardedAttributeViolationUsing", "handleMissingAttributeViolationUsing",
    "isClassCastable", "preventsLazyLoading", "preventsAccessingMissingAttributes",
    "preventsSilentlyDiscardingAttributes", "qualifyColumn", "qualifyColumns",
    "withoutEvents", "withoutTimestamps", "withoutTimestampsOn",
    // HasAttributes
    "append", "attributesToArray", "getAppends", "getAttribute", "getAttributeValue",
    "getAttributes", "getCasts", "getChanges", "getDates", "getDirty", "getMutatedAttributes",
    "getOriginal", "getRawOriginal", "getRelationValue", "hasAppended", "hasAttributeMutator",
    "hasAttributeSetMutator", "hasCast", "hasGetMutator", "hasSetMutator", "isClean",
    "isDirty", "isRelation", "mergeCasts", "only", "originalIsEquivalent", "relationsToArray",
    "setAppends", "setAttribute", "setDateFormat", "setRawAttributes", "syncChanges",
    "syncOriginal", "syncOriginalAttribute", "syncOriginalAttributes", "wasChanged",
    "fromDateTime", "fromJson", "getDateFormat", "cacheMutatedAttributes",
    "encryptUsing", "hasAnyGetMutator", "withCasts", "getPreviousAttributes",
    // HasEvents
    "addObservableEvents", "flushEventListeners", "getEventDispatcher", "getObservableEvents",
    "observe", "removeObservableEvents", "setEventDispatcher", "setObservableEvents",
    "retrieved", "saving", "saved", "updating", "updated", "creating", "created",
    "replicating", "deleting", "deleted", "dispatchesEvents",
    // HasGlobalScopes
    "addGlobalScope", "addGlobalScopes", "getGlobalScope", "getGlobalScopes", "hasGlobalScope",
    // HasRelationships
    "belongsTo", "belongsToMany", "getRelation", "getRelations", "getTouchedRelations",
    "hasMany", "hasManyThrough", "hasOne", "hasOneThrough", "joiningTable",
    "joiningTableSegment", "morphMany", "morphOne", "morphTo", "morphToMany", "morphedByMany",
    "relationLoaded", "relationResolver", "resolveRelationUsing", "setRelation", "setRelations",
    "setTouchedRelations", "touchOwners", "touches", "unsetRelation", "unsetRelations",
    "withoutRelations", "withoutRelation", "getActualClassNameForMorph", "through",
    // HasTimestamps
    "getCreatedAtColumn", "getQualifiedCreatedAtColumn", "getQualifiedUpdatedAtColumn",
    "getUpdatedAtColumn", "setCreatedAt", "setUpdatedAt", "updateTimestamps",
    "freshTimestampString", "isIgnoringTimestamps",
    // HidesAttributes
    "getHidden", "getVisible", "makeHidden", "makeHiddenIf", "makeVisible", "makeVisibleIf",
    "setHidden", "setVisible",
    // GuardsAttributes
    "fillable", "getFillable", "getGuarded", "guard", "isFillable", "isGuarded",
    "isUnguarded", "mergeFillable", "mergeGuarded", "reguard", "totallyGuarded", "unguard",
    "unguarded",
    // ForwardsCalls, Arrayable and friends
    "getKeyForSaveQuery", "getQualifiedKeyName", "setAttributeMarkedMutatedAttributeValue",
    // Protected and static methods models commonly redeclare
    "boot", "booted", "booting", "bootIfNotBooted", "bootTraits", "initializeTraits",
    "casts", "serializeDate", "newBaseQueryBuilder", "performInsert", "performUpdate",
    "performDeleteOnModel", "finishSave", "setKeysForSaveQuery", "setKeysForSelectQuery",
    "insertAndSetId", "incrementOrDecrement", "fireModelEvent", "getArrayableAttributes",
    "getArrayableAppends", "getArrayableRelations", "getArrayableItems", "asDateTime",
    "asJson", "castAttribute", "mutateAttribute", "usesUniqueIds", "uniqueIds",
    "newUniqueId", "isGuardableColumn", "getKeyForSelectQuery", "childRouteBindingRelationshipName",
];

/// Method-name set of a base model class.
///
/// Names are stored lowercased because the host runtime resolves method
/// names case-insensitively.
#[derive(Debug, Clone)]
pub struct BaseModel {
    class_name: String,
    methods: HashSet<String>,
}

impl BaseModel {
    pub fn new<I, S>(class_name: impl Into<String>, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut base = Self { class_name: class_name.into(), methods: HashSet::new() };
        base.extend(methods);
        base
    }

    /// The Eloquent `Model` class with its standard public API.
    pub fn eloquent() -> Self {
        Self::new(ELOQUENT_MODEL_CLASS, ELOQUENT_MODEL_METHODS.iter().copied())
    }

    /// Keep the method set but report a different class name.
    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Whether `class` names the base class itself.
    ///
    /// Compares fully qualified names, ignoring a leading backslash and case.
    pub fn is_class(&self, class: &str) -> bool {
        let normalize = |name: &str| name.trim().trim_start_matches('\\').to_ascii_lowercase();
        normalize(class) == normalize(&self.class_name)
    }

    /// Whether a method of this name exists on the base class.
    pub fn has_method(&self, name: &str) -> bool {
        self.methods.contains(&name.to_ascii_lowercase())
    }

    /// Add more method names (e.g. from an application-wide base model).
    pub fn extend<I, S>(&mut self, methods: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.methods.extend(methods.into_iter().map(|m| m.as_ref().to_ascii_lowercase()));
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl Default for BaseModel {
    fn default() -> Self {
        Self::eloquent()
    }
}
